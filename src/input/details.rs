use serde::Deserialize;

fn default_billed_to() -> String {
    "Company Name Here".to_string()
}

fn default_pay_to() -> String {
    "Your Name Here".to_string()
}

fn default_invoice_number() -> String {
    "#INVOICE_NUMBER_HERE".to_string()
}

fn default_pay_address() -> String {
    "Your Address Here".to_string()
}

/// The static text of the header block. Unset values fall back to placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InvoiceDetails {
    #[serde(default = "default_billed_to", alias = "billedTo")]
    billed_to: String,
    #[serde(default = "default_pay_to", alias = "payTo")]
    pay_to: String,
    #[serde(default = "default_invoice_number", alias = "invoiceNumber")]
    invoice_number: String,
    #[serde(default = "default_pay_address", alias = "payAddress")]
    pay_address: String,
}

impl Default for InvoiceDetails {
    fn default() -> Self {
        Self {
            billed_to: default_billed_to(),
            pay_to: default_pay_to(),
            invoice_number: default_invoice_number(),
            pay_address: default_pay_address(),
        }
    }
}

impl InvoiceDetails {
    #[must_use]
    pub fn billed_to(&self) -> &str {
        &self.billed_to
    }

    #[must_use]
    pub fn pay_to(&self) -> &str {
        &self.pay_to
    }

    #[must_use]
    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    #[must_use]
    pub fn pay_address(&self) -> &str {
        &self.pay_address
    }

    pub fn set_billed_to(&mut self, value: impl Into<String>) -> &mut Self {
        self.billed_to = value.into();
        self
    }

    pub fn set_pay_to(&mut self, value: impl Into<String>) -> &mut Self {
        self.pay_to = value.into();
        self
    }

    pub fn set_invoice_number(&mut self, value: impl Into<String>) -> &mut Self {
        self.invoice_number = value.into();
        self
    }

    pub fn set_pay_address(&mut self, value: impl Into<String>) -> &mut Self {
        self.pay_address = value.into();
        self
    }
}
