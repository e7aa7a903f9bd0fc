//! Fixed instruction and response schema for the extraction service.

/// System instruction sent with every extraction request.
pub const SYSTEM_INSTRUCTION: &str = "\
Você é um analista de dados para uma comunidade brasileira em Paris.
Classifique como \"market\" (serviços), \"job\" (empregos) ou \"place\" (lugares).
Extraia campos relevantes (title, price, company, address, whatsapp, etc).
Retorne estritamente JSON.";

/// User prompt wrapping the raw pasted text.
pub fn format_extract_prompt(raw_text: &str) -> String {
    format!("Extraia dados estruturados deste texto: \"{raw_text}\"")
}

/// Strict response schema: a required `type` enum plus a free-form `data`
/// object. Field-level validation happens after parsing, in
/// [`crate::types::parse_response`].
pub fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "type": { "type": "STRING", "enum": ["market", "job", "place"] },
            "data": { "type": "OBJECT" }
        },
        "required": ["type", "data"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_raw_text() {
        let prompt = format_extract_prompt("Procuro babá para Paris 15");
        assert!(prompt.contains("Procuro babá para Paris 15"));
    }

    #[test]
    fn schema_requires_type_and_data() {
        let schema = response_schema();
        let required: Vec<_> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, vec!["type", "data"]);
    }
}
