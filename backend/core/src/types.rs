//! Serde model of the payment-advice record the extraction prompt describes.
//!
//! This schema is a contract with the external model, not something the
//! gateway enforces: the response path parses the model's reply as untyped
//! JSON and passes it through. The typed model exists for tests and for
//! downstream consumers that want to deserialize a known-good reply.

use serde::{Deserialize, Serialize};

/// Outer envelope the prompt instructs the model to return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceEnvelope {
    pub status: String,
    pub message: String,
    pub data: PaymentAdvice,
}

/// Header fields plus the ordered list of line-item records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentAdvice {
    pub doc_number: Option<String>,
    pub payment_date: Option<String>,
    pub total_amount: Option<String>,
    pub account_number: Option<String>,
    pub company_name: Option<String>,
    pub issuer_company: Option<String>,
    pub payment_details: Vec<PaymentDetail>,
    pub document_type: Option<String>,
    pub extraction_timestamp: Option<String>,
    pub source_file: Option<String>,
    pub success: bool,
}

/// One table row from the advice document.
///
/// `tds_amount`, `narration`, and `is_deduction` are conditionally present
/// per the prompt's field rules, so absence must round-trip as absence
/// rather than `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentDetail {
    pub doc_no: Option<String>,
    pub invoice_ref: Option<String>,
    pub document_amount: Option<String>,
    pub payment_amount: Option<String>,
    pub doc_date: Option<String>,
    pub invoice_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tds_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deduction: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detail_omits_conditional_fields_when_absent() {
        let detail = PaymentDetail {
            doc_no: Some("12398531".into()),
            invoice_ref: Some("CK3052-FY26".into()),
            document_amount: Some("9,487.00".into()),
            payment_amount: Some("9,478.96".into()),
            doc_date: Some("07.07.2025".into()),
            invoice_date: Some("03.07.2025".into()),
            tds_amount: None,
            narration: None,
            is_deduction: None,
        };
        let value = serde_json::to_value(&detail).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("tds_amount"));
        assert!(!obj.contains_key("narration"));
        assert!(!obj.contains_key("is_deduction"));
    }

    #[test]
    fn gst_hold_detail_round_trips() {
        let raw = json!({
            "doc_no": "4370446419",
            "invoice_ref": "CK3052-FY26",
            "document_amount": null,
            "payment_amount": "-2,797.12",
            "doc_date": "07.07.2025",
            "invoice_date": "03.07.2025",
            "narration": "GST TAX HOLD",
            "is_deduction": true
        });
        let detail: PaymentDetail = serde_json::from_value(raw).unwrap();
        assert_eq!(detail.narration.as_deref(), Some("GST TAX HOLD"));
        assert_eq!(detail.is_deduction, Some(true));
        assert!(detail.tds_amount.is_none());
    }

    #[test]
    fn envelope_deserializes_prompt_skeleton() {
        let raw = json!({
            "status": "success",
            "message": "Payment Advice processed successfully",
            "data": {
                "doc_number": "4200112633/2025",
                "payment_date": "11.07.2025",
                "total_amount": "99,951.76",
                "account_number": "20001756",
                "company_name": "COMBINED FOODS (P) LIMITED",
                "issuer_company": "Reliance Retail Limited",
                "payment_details": [],
                "document_type": "payment_advice",
                "extraction_timestamp": null,
                "source_file": "advice.pdf",
                "success": true
            }
        });
        let envelope: AdviceEnvelope = serde_json::from_value(raw).unwrap();
        assert_eq!(envelope.status, "success");
        assert_eq!(envelope.data.doc_number.as_deref(), Some("4200112633/2025"));
        assert!(envelope.data.success);
    }
}
