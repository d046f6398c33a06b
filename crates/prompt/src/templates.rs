//! Prompt templates.
//!
//! Variables use Handlebars syntax and are rendered without HTML escaping.

/// Prompt id of the classification template.
pub const CLASSIFICATION_PROMPT_ID: &str = "document.classify";

/// Prompt id of the question-answering template.
pub const ANSWER_PROMPT_ID: &str = "document.answer";

/// Classification prompt.
///
/// Variables: `fileName`, `documentSection`.
pub const CLASSIFICATION_TEMPLATE: &str = r#"You are a document classification expert. Analyze the provided document and classify it into one of the following categories:

CATEGORIES:
1. POLICY - Documents that define rules, procedures, guidelines, regulations, standards, protocols, or organizational policies. Examples: Refund Policy, Information Security Procedures, Code of Conduct, Terms of Service, Compliance Guidelines.
2. REPORT - Documents presenting data, statistics, analyses, findings, evaluations, or summaries. Examples: Quarterly Sales Report, System Performance Report, Annual Review, Audit Report, Data Analysis.
3. MANUAL - Documents providing instructions, guides, tutorials, or step-by-step procedures. Examples: User Guide, Operating Instructions, Training Manual, How-To Guide, Technical Documentation.
4. UNDEFINED - Documents that do not clearly fit into any of the above categories, or cannot be determined.

CLASSIFICATION CRITERIA:
- Consider both the document name and content when making your decision.
- Look for keywords, structure, and purpose indicators.
- If the document contains multiple elements, classify based on the primary purpose.
- When uncertain, choose UNDEFINED.

DOCUMENT INFORMATION:
File Name: {{fileName}}
{{documentSection}}
INSTRUCTION:
Respond with ONLY the category name (POLICY, REPORT, MANUAL, or UNDEFINED) - no additional text, explanation, or punctuation."#;

/// Question-answering prompt.
///
/// Variables: `documentContext`, `question`, `categoryInstructions`.
pub const ANSWER_TEMPLATE: &str = r#"You are a helpful assistant that answers questions based on provided document content.

DOCUMENT CONTEXT:
{{documentContext}}

QUESTION: {{question}}

INSTRUCTIONS:
- Answer the question based ONLY on the information provided in the document context above.
- If the answer cannot be found in the document, say "The answer is not found in the document."
- Provide a clear, concise, and accurate answer.
- If the question is unclear or unrelated to the document, politely indicate that.
{{categoryInstructions}}"#;

/// Appended for POLICY documents.
pub const POLICY_INSTRUCTIONS: &str = "
SPECIAL BEHAVIOR FOR POLICY DOCUMENTS:
- Focus on sections and headers when answering.
- Reference specific policy sections when relevant.
- Structure your answer to align with the document's organizational structure.
";

/// Appended for REPORT documents.
pub const REPORT_INSTRUCTIONS: &str = "
SPECIAL BEHAVIOR FOR REPORT DOCUMENTS:
- Include summaries or highlighted data points when relevant.
- Reference specific statistics, metrics, or findings from the report.
- Provide quantitative information when available.
";

/// Appended for MANUAL documents.
pub const MANUAL_INSTRUCTIONS: &str = "
SPECIAL BEHAVIOR FOR MANUAL DOCUMENTS:
- Include practical steps when answering how-to questions.
- Provide step-by-step instructions when relevant.
- Focus on actionable guidance and procedures.
";

/// Refusal phrase the model is told to use for unanswerable questions.
pub const NOT_FOUND_PHRASE: &str = "The answer is not found in the document.";
