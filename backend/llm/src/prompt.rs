//! The fixed payment-advice extraction prompt.
//!
//! The template, sampling parameters, and system message are the whole
//! "processing logic" of this service: everything else is delegated to the
//! model's interpretation of these instructions. Extracted document text is
//! spliced into the `{pdf_text}` slot; the upload's original filename fills
//! `{source_file}` so the model can echo it back in the record.

use remitex_core::LlmRequest;

/// Default completion model.
pub const DEFAULT_MODEL: &str = "gpt-oss-120b";

/// Fixed sampling temperature.
pub const TEMPERATURE: f32 = 0.2;

/// Fixed completion-token ceiling.
pub const MAX_TOKENS: u32 = 11192;

/// System message accompanying every extraction request.
pub const SYSTEM_PROMPT: &str = "You are a data extraction assistant.";

/// Instruction template. `{source_file}` and `{pdf_text}` are the only
/// substitution slots.
pub const ADVICE_TEMPLATE: &str = r#"
{
"status": "success",
"message": "Payment Advice processed successfully",
"data": {
"doc_number": null,
"payment_date": null,
"total_amount": null,
"account_number": null,
"company_name": null,
"issuer_company": "Reliance Retail Limited",
"payment_details": [
{
"doc_no": null,
"invoice_ref": null,
"document_amount": null,
"payment_amount": null,
"doc_date": null,
"invoice_date": null,
"is_deduction": false
}
],
"document_type": "payment_advice",
"extraction_timestamp": null,
"source_file": null,
"success": true
}
}
You are a precise document processing assistant specialized in extracting structured data from payment advice documents issued by Reliance Retail Limited. Your task is to analyze the provided payment advice document text and extract ALL payment entries, including regular payments, TDS deductions, and GST TAX HOLD/PAID entries from ALL pages. Return the result in the JSON format specified above and NOTHING ELSE.

The document has a table structure with the following columns:
Doc. No. | Inv./Ref. Doc.No. | Inv./Ref Doc. Amt. | Payment Amount
Doc. Date | Inv./Ref. Doc.Date | |
Narration | | |

CRITICAL FIELD MAPPING:
"doc_no": Extract from "Doc. No." (e.g., "12398531", "4370446419")
"invoice_ref": Extract from "Inv./Ref. Doc.No." (e.g., "CK3052-FY26")
"document_amount": Extract from "Inv./Ref Doc. Amt." (e.g., "9,487.00"). Set to null if blank or not present.
"payment_amount": Extract from "Payment Amount" (e.g., "9,478.96", "-2,797.12"). Set to null if blank or not present.
"doc_date": Extract from "Doc. Date" in exact format (e.g., "07.07.2025")
"invoice_date": Extract from "Inv./Ref. Doc.Date" in exact format (e.g., "03.07.2025")
"tds_amount": Extract from "Narration" if explicitly mentioned as "(TDS Amount X.XX-)" (e.g., "4.00-"). Do not include the field if not present or for GST entries.
"is_deduction":
- Include this field for GST TAX HOLD entries (true) and GST TAX PAID entries (false).
- Include this field for regular payments only if there is NO tds_amount.
- Omit this field entirely if tds_amount is present.

NARRATION HANDLING:
Only include the "narration" field in "payment_details" for entries with "GST TAX HOLD" or "GST TAX PAID" in the Narration column.
For TDS entries (e.g., containing "(TDS Amount 4.00-)") and regular payments, DO NOT include the "narration" field in the JSON output, even as null.
For GST entries, set "narration" to the exact value (e.g., "GST TAX HOLD", "GST TAX PAID").

SPECIAL HANDLING FOR ENTRIES:
Regular Payment Entries:
Include: doc_no, invoice_ref, doc_date, invoice_date, document_amount, payment_amount, tds_amount (if present), and is_deduction (false) *only if no tds_amount is present*.
Example: "12398531 CK3052-FY26 9487.00 9,478.96" with "(TDS Amount 8.04-)" → "document_amount": "9,487.00", "payment_amount": "9,478.96", "tds_amount": "8.04-" (no is_deduction field in this case).

GST TAX HOLD Entries:
Identified by "Narration" containing "GST TAX HOLD" and negative payment amount (e.g., "-2,797.12").
Include: doc_no, invoice_ref, doc_date, invoice_date, document_amount (null), payment_amount (e.g., "-2,797.12"), narration ("GST TAX HOLD"), is_deduction (true). Do not include "tds_amount".

GST TAX PAID Entries:
Identified by "Narration" containing "GST TAX PAID" and positive payment amount.
Include: doc_no, invoice_ref, doc_date, invoice_date, document_amount (if present, else null), payment_amount, narration ("GST TAX PAID"), is_deduction (false). Do not include "tds_amount".

STRICT INSTRUCTIONS:
DO NOT guess or infer missing data. If a value cannot be located with certainty, return null.
Preserve numbers exactly as in the document, including commas, decimal points, minus signs, and trailing hyphens for negative amounts (e.g., "9,487.00", "2,797.12-").
Never copy a value into both "document_amount" and "payment_amount" for the same entry.
Dates: Copy exactly as shown (e.g., "07.07.2025"). If only one date is found, fill that and leave the other null.
TDS: Only extract "tds_amount" from "Narration" if explicitly stated as "(TDS Amount X.XX-)". Preserve exact format (e.g., "4.00-"). Include the "tds_amount" field only if a value is extracted; otherwise, exclude it entirely.
Payment Details:
Extract each table row as a separate object in the "payment_details" array.
Maintain the order as they appear in the document.
Do not merge entries.

Header Fields:
"doc_number": Extract the settlement document number (e.g., "4200112633/2025").
"payment_date": Extract from "Date" (e.g., "11.07.2025").
"total_amount": Extract from "Total INR" (e.g., "99,951.76"), without currency symbol.
"account_number": Extract from "Your A/c with us" (e.g., "20001756").
"company_name": Extract the vendor name with full suffix (e.g., "COMBINED FOODS (P) LIMITED").
"extraction_timestamp": Set to current timestamp in ISO format (e.g., "2025-08-12T12:18:00+05:30").
"source_file": Use the provided source file name (e.g., "{source_file}").

Output:
Return ONLY the JSON structure specified above, with no additional text, commentary, or markdown.
For TDS and regular payment entries, exclude the "narration" field entirely from the JSON object.
For all entries, exclude the "tds_amount" field if no TDS amount is extracted.
Omit the "is_deduction" field entirely if tds_amount is present.
If multiple pages exist, combine all entries in the "payment_details" array in document order.

PDF TEXT FROM ALL PAGES:
{pdf_text}
"#;

/// Splice extracted text and the source filename into the fixed template.
pub fn build_prompt(pdf_text: &str, source_file: &str) -> String {
    ADVICE_TEMPLATE
        .replace("{source_file}", source_file)
        .replace("{pdf_text}", pdf_text)
}

/// Build the complete request for one extraction: fixed template, fixed
/// sampling parameters, caller-selected model name.
pub fn advice_request(model: &str, pdf_text: &str, source_file: &str) -> LlmRequest {
    LlmRequest {
        model: model.to_string(),
        system_prompt: SYSTEM_PROMPT.to_string(),
        user_prompt: build_prompt(pdf_text, source_file),
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_contains_spliced_text() {
        let prompt = build_prompt("Doc. No. 12398531", "advice.pdf");
        assert!(prompt.ends_with("Doc. No. 12398531\n"));
        assert!(prompt.contains("e.g., \"advice.pdf\""));
        assert!(!prompt.contains("{pdf_text}"));
        assert!(!prompt.contains("{source_file}"));
    }

    #[test]
    fn request_carries_fixed_parameters() {
        let req = advice_request(DEFAULT_MODEL, "text", "a.pdf");
        assert_eq!(req.model, "gpt-oss-120b");
        assert_eq!(req.max_tokens, 11192);
        assert!((req.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(req.system_prompt, SYSTEM_PROMPT);
    }

    #[test]
    fn template_keeps_field_mapping_rules() {
        assert!(ADVICE_TEMPLATE.contains("CRITICAL FIELD MAPPING"));
        assert!(ADVICE_TEMPLATE.contains("GST TAX HOLD"));
        assert!(ADVICE_TEMPLATE.contains("\"issuer_company\": \"Reliance Retail Limited\""));
    }
}
