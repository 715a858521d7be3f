//! LLM prompt construction for field extraction

use gleaner_domain::field::STANDARD_FIELDS;

/// Builds extraction prompts around a document's text
pub struct PromptBuilder {
    text: String,
}

impl PromptBuilder {
    /// Create a new prompt builder for one document
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Build the personal-data extraction prompt
    ///
    /// Asks for a JSON object mapping every standard field label to a
    /// `{value, confidence}` pair, with "Not found" for absent fields.
    pub fn build_personal(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(PERSONAL_INSTRUCTIONS);
        prompt.push_str("\n\nFields to extract:\n");
        for (label, _) in STANDARD_FIELDS {
            prompt.push_str(&format!("- {}\n", label));
        }

        prompt.push_str(
            "\nIf a field is not found in the document, use \"Not found\" as the value \
             and 0.0 as confidence.\nIf a field is found but you are uncertain about \
             the value, use a lower confidence score.\n",
        );

        prompt.push_str("\nDocument content:\n---\n");
        prompt.push_str(&self.text);
        prompt.push_str("\n---\n\n");

        prompt.push_str(PERSONAL_FORMAT_REMINDER);

        prompt
    }

    /// Build the tabular-data extraction prompt
    ///
    /// Asks for a JSON array of table objects with dataType, headers, data
    /// rows, confidence, and a description.
    pub fn build_tabular(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(TABULAR_INSTRUCTIONS);

        prompt.push_str("\nDocument content:\n---\n");
        prompt.push_str(&self.text);
        prompt.push_str("\n---\n\n");

        prompt.push_str(TABULAR_FORMAT_REMINDER);

        prompt
    }
}

const PERSONAL_INSTRUCTIONS: &str = "\
Please extract the following personal details from the document below.
For each field, provide the extracted value and a confidence score (0.0 to 1.0) \
indicating how certain you are about the extraction.";

const PERSONAL_FORMAT_REMINDER: &str = r#"Respond with a JSON object where each key is a field name and each value is an object with "value" and "confidence" properties. Example:

{
  "First name": {"value": "John", "confidence": 0.9},
  "Last name": {"value": "Not found", "confidence": 0.0}
}

Output the JSON object only, with no additional text."#;

const TABULAR_INSTRUCTIONS: &str = "\
Please identify and extract all tabular data from the document below.
For each table or structured data area you find, provide:
1. The table data in a structured format
2. A dataType classification (e.g., \"financial_data\", \"contact_list\", \"transaction_history\")
3. Column headers if present
4. A confidence score (0.0 to 1.0) for the extraction accuracy
";

const TABULAR_FORMAT_REMINDER: &str = r#"Respond with a JSON array where each element represents a table with this structure:

[
  {
    "dataType": "financial_data",
    "headers": ["Date", "Description", "Amount"],
    "data": [
      ["2024-01-01", "Salary", "5000"],
      ["2024-01-02", "Rent", "-1200"]
    ],
    "confidence": 0.9,
    "description": "Monthly financial transactions"
  }
]

If no tabular data is found, return an empty array: []

Common dataType classifications include: financial_data, contact_list, transaction_history, employment_records, asset_inventory, schedule_data, inventory_data.
Output the JSON array only, with no additional text."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_personal_prompt_lists_all_fields() {
        let prompt = PromptBuilder::new("some document").build_personal();
        for (label, _) in STANDARD_FIELDS {
            assert!(prompt.contains(label), "missing field label: {}", label);
        }
        assert!(prompt.contains("some document"));
        assert!(prompt.contains("Not found"));
    }

    #[test]
    fn test_tabular_prompt_includes_document_and_format() {
        let prompt = PromptBuilder::new("a,b,c\n1,2,3").build_tabular();
        assert!(prompt.contains("a,b,c"));
        assert!(prompt.contains("dataType"));
        assert!(prompt.contains("headers"));
    }
}
