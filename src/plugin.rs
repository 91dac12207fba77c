//! Query plugins and the compile pipeline.
//!
//! A plugin rewrites a root node before compilation. The pipeline runs its
//! plugins in registration order and hands the result to the compiler.

use tracing::debug;

use crate::ast::RootOperationNode;
use crate::compiler::{CompiledQuery, DefaultQueryCompiler, Dialect, QueryCompiler};
use crate::config::PipelineConfig;
use crate::error::NodeResult;
use crate::transformer::{OperationNodeTransformer, WithSchemaTransformer};

pub trait QueryPlugin {
    fn name(&self) -> &str;

    fn transform_query(&mut self, query: &RootOperationNode) -> NodeResult<RootOperationNode>;
}

/// Qualifies unqualified table references with a fixed schema.
#[derive(Debug)]
pub struct WithSchemaPlugin {
    transformer: WithSchemaTransformer,
}

impl WithSchemaPlugin {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            transformer: WithSchemaTransformer::new(schema),
        }
    }
}

impl QueryPlugin for WithSchemaPlugin {
    fn name(&self) -> &str {
        "with_schema"
    }

    fn transform_query(&mut self, query: &RootOperationNode) -> NodeResult<RootOperationNode> {
        self.transformer.transform_query(query)
    }
}

pub struct QueryPipeline {
    plugins: Vec<Box<dyn QueryPlugin>>,
    compiler: DefaultQueryCompiler<Dialect>,
}

impl QueryPipeline {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            plugins: vec![],
            compiler: DefaultQueryCompiler::new(dialect),
        }
    }

    /// Build a pipeline from configuration. A configured schema installs
    /// a [`WithSchemaPlugin`].
    pub fn from_config(config: &PipelineConfig) -> Self {
        let mut pipeline = Self::new(config.dialect);
        if let Some(schema) = &config.schema {
            pipeline = pipeline.with_plugin(WithSchemaPlugin::new(schema.clone()));
        }
        pipeline
    }

    pub fn with_plugin(mut self, plugin: impl QueryPlugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Run every plugin, in order.
    pub fn transform(&mut self, query: &RootOperationNode) -> NodeResult<RootOperationNode> {
        let mut query = query.clone();
        for plugin in &mut self.plugins {
            debug!(plugin = plugin.name(), kind = %query.kind(), "running plugin");
            query = plugin.transform_query(&query)?;
        }
        Ok(query)
    }

    pub fn compile(&mut self, query: &RootOperationNode) -> NodeResult<CompiledQuery> {
        let transformed = self.transform(query)?;
        Ok(self.compiler.compile_query(&transformed))
    }
}
