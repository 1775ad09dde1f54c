//! File-search tool: the gateway searches a vector store on the model's behalf.

use super::schema::{pinned, pinned_array, SchemaGenerator};
use crate::config::AgcConfig;
use crate::types::{FunctionDefinition, ToolDefinition};

pub const TOOL_NAME: &str = "file-search-tool";
pub const VECTOR_STORE_ID: &str = "vs_68b98d857f73cf000000";
pub const EMBEDDING_MODEL: &str = "openai@text-embedding-3-small";

/// Descriptor for the chemistry file-search tool.
///
/// The gateway's bearer token is pinned into `modelInfo` so the embedding
/// call made server-side uses the caller's credentials.
pub fn file_search_tool(config: &AgcConfig) -> ToolDefinition {
    let model_info = SchemaGenerator::new()
        .require_property("bearerToken", pinned(config.api_key.as_str()))
        .require_property("model", pinned(EMBEDDING_MODEL))
        .set_additional_properties(false)
        .build();

    let parameters = SchemaGenerator::new()
        .require_property("type", pinned("file_search"))
        .require_property("vector_store_ids", pinned_array(VECTOR_STORE_ID))
        .require_property("modelInfo", model_info)
        .set_additional_properties(false)
        .build();

    ToolDefinition::function(
        FunctionDefinition::new(TOOL_NAME, parameters)
            .description("This tool can make provide information about chemical reactions")
            .strict(true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Scenario;
    use crate::tools::schema::pinned_value;
    use serde_json::json;

    fn config() -> AgcConfig {
        AgcConfig::resolve(Scenario::FileSearch, |k| {
            (k == "OPENAI_API_KEY").then(|| "sk-test".to_string())
        })
        .unwrap()
    }

    #[test]
    fn test_file_search_descriptor_shape() {
        let tool = file_search_tool(&config());
        assert_eq!(tool.tool_type, "function");
        assert_eq!(tool.name(), TOOL_NAME);
        assert_eq!(tool.function.strict, Some(true));

        let params = &tool.function.parameters;
        assert_eq!(params["required"], json!(["type", "vector_store_ids", "modelInfo"]));
        assert_eq!(params["additionalProperties"], false);
        assert_eq!(pinned_value(&params["properties"]["type"]), Some("file_search"));
        assert_eq!(
            pinned_value(&params["properties"]["vector_store_ids"]["items"]),
            Some(VECTOR_STORE_ID)
        );
    }

    #[test]
    fn test_bearer_token_is_pinned_from_config() {
        let tool = file_search_tool(&config());
        let model_info = &tool.function.parameters["properties"]["modelInfo"];
        assert_eq!(pinned_value(&model_info["properties"]["bearerToken"]), Some("sk-test"));
        assert_eq!(pinned_value(&model_info["properties"]["model"]), Some(EMBEDDING_MODEL));
        assert_eq!(model_info["required"], json!(["bearerToken", "model"]));
    }

    #[test]
    fn test_builder_is_deterministic() {
        let cfg = config();
        assert_eq!(file_search_tool(&cfg), file_search_tool(&cfg));
    }
}
