use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

/// A named operation the agent runtime can invoke with structured arguments.
///
/// # Contract
/// - Must be Send + Sync (stored behind `Box<dyn Tool>` and shared with the
///   hosting runtime's tasks)
/// - `parameters()` returns a JSON Schema object describing the arguments
/// - `execute` returns Ok(json_string) or Err(json_string); both sides are
///   serialized objects with a `"status"` field so the runtime always gets
///   structured detail, never a bare panic message
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn parameters(&self) -> Value;
    async fn execute(&self, args: &HashMap<String, Value>) -> Result<String, String>;
}

/// Tool schema in the shape LLM tool-use APIs expect.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ToolSchema {
    pub name:         String,
    pub description:  String,
    pub input_schema: Value,   // JSON Schema object
}

pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: HashMap::new() }
    }

    /// Register a tool under its own `name()`. A second registration with the
    /// same name replaces the first.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Execute a named tool with given arguments.
    /// Returns Ok(result_json) or Err(error_json).
    /// Never panics — all failures are captured as Err variants.
    pub async fn execute(&self, name: &str, args: &HashMap<String, Value>) -> Result<String, String> {
        match self.tools.get(name) {
            Some(tool) => tool.execute(args).await,
            None       => Err(format!("Tool '{}' not found in registry", name)),
        }
    }

    /// Returns true if a tool with this name is registered.
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Returns all tool schemas — used to build the tools array the runtime
    /// sends to its LLM.
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools
            .values()
            .map(|t| ToolSchema {
                name:         t.name().to_string(),
                description:  t.description().to_string(),
                input_schema: t.parameters(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str { "echo" }
        fn description(&self) -> &str { "Echoes its 'text' argument" }
        fn parameters(&self) -> Value {
            json!({ "type": "object", "properties": { "text": { "type": "string" } } })
        }
        async fn execute(&self, args: &HashMap<String, Value>) -> Result<String, String> {
            args.get("text")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| "missing 'text'".to_string())
        }
    }

    #[tokio::test]
    async fn registry_dispatches_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        assert!(registry.has("echo"));
        assert_eq!(registry.len(), 1);

        let mut args = HashMap::new();
        args.insert("text".to_string(), json!("hello"));
        assert_eq!(registry.execute("echo", &args).await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error_not_a_panic() {
        let registry = ToolRegistry::new();
        let err = registry.execute("nope", &HashMap::new()).await.unwrap_err();
        assert!(err.contains("nope"));
    }

    #[test]
    fn schemas_expose_registered_tools() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        let schemas = registry.schemas();
        assert_eq!(schemas.len(), 1);
        assert_eq!(schemas[0].name, "echo");
        assert!(schemas[0].input_schema.is_object());
    }
}
