use crate::domain::booking::BookingConfirmation;
use crate::error::Result;
use std::io::Write;

/// Writes a booking confirmation as one pretty-printed JSON document.
pub fn write_confirmation<W: Write>(mut sink: W, confirmation: &BookingConfirmation) -> Result<()> {
    serde_json::to_writer_pretty(&mut sink, confirmation)?;
    writeln!(sink)?;
    sink.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::draft::BookingDraft;
    use crate::domain::money::NightlyRate;
    use crate::domain::pricing::quote;
    use rust_decimal_macros::dec;

    #[test]
    fn test_write_confirmation_json() {
        let confirmation = BookingConfirmation {
            property_id: "ksamil-1".to_string(),
            property_name: "Ksamil Beach House".to_string(),
            draft: BookingDraft {
                check_in: "2024-08-01".to_string(),
                check_out: "2024-08-04".to_string(),
                ..Default::default()
            },
            pricing: quote(NightlyRate::new(dec!(100)).unwrap(), "2024-08-01", "2024-08-04"),
            reference: "TBNB-000001".to_string(),
        };

        let mut buf = Vec::new();
        write_confirmation(&mut buf, &confirmation).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["reference"], "TBNB-000001");
        assert_eq!(value["draft"]["guests"], 1);
        assert_eq!(value["draft"]["payment_method"], "card");
        assert_eq!(value["pricing"]["nights"], 3);
        assert_eq!(value["pricing"]["total"], "405");
    }
}
