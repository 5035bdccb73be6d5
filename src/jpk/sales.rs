//! Sales register rows (SprzedazWiersz).
//!
//! Each invoice becomes one row. Product net prices are summed per tax rate
//! and mapped onto the fixed K_ columns of the register:
//!
//! | Rate | Net  | Tax due |
//! |------|------|---------|
//! | zw   | K_10 | —       |
//! | 0%   | K_13 | —       |
//! | 5%   | K_15 | K_16    |
//! | 8%   | K_17 | K_18    |
//! | 23%  | K_19 | K_20    |
//!
//! A column pair appears only when its net amount is strictly positive.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::fields::FieldMap;
use crate::core::{
    Invoice, Order, Product, TaxRate, format_amount, parse_amount, round_amount,
};

/// Net amounts per tax rate for one order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaxBuckets {
    pub exempt: Decimal,
    pub zero: Decimal,
    pub reduced_5: Decimal,
    pub reduced_8: Decimal,
    pub standard_23: Decimal,
}

impl TaxBuckets {
    /// Sum product prices by rate. Products with an unknown rate label are skipped.
    pub fn from_products(products: &[Product]) -> Self {
        let mut buckets = Self::default();
        for product in products {
            match product.rate() {
                Some(rate) => *buckets.slot_mut(rate) += product.price,
                None => {
                    tracing::trace!(label = %product.tax_rate, "skipping product with unknown tax rate");
                }
            }
        }
        buckets
    }

    pub fn get(&self, rate: TaxRate) -> Decimal {
        match rate {
            TaxRate::Exempt => self.exempt,
            TaxRate::Zero => self.zero,
            TaxRate::Reduced5 => self.reduced_5,
            TaxRate::Reduced8 => self.reduced_8,
            TaxRate::Standard23 => self.standard_23,
        }
    }

    fn slot_mut(&mut self, rate: TaxRate) -> &mut Decimal {
        match rate {
            TaxRate::Exempt => &mut self.exempt,
            TaxRate::Zero => &mut self.zero,
            TaxRate::Reduced5 => &mut self.reduced_5,
            TaxRate::Reduced8 => &mut self.reduced_8,
            TaxRate::Standard23 => &mut self.standard_23,
        }
    }
}

/// One row of the sales register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesRow {
    /// LpSprzedazy — the invoice id.
    pub number: u64,
    /// NrKontrahenta — always `"brak"`, buyers are not identified by NIP.
    pub counterparty_code: String,
    pub counterparty_name: String,
    pub counterparty_address: String,
    /// DowodSprzedazy — the invoice number.
    pub document_number: String,
    pub issue_date: NaiveDate,
    pub k_10: Option<String>,
    pub k_13: Option<String>,
    pub k_15: Option<String>,
    pub k_16: Option<String>,
    pub k_17: Option<String>,
    pub k_18: Option<String>,
    pub k_19: Option<String>,
    pub k_20: Option<String>,
}

impl SalesRow {
    /// Net amount column for `rate`.
    pub fn net(&self, rate: TaxRate) -> Option<&str> {
        match rate {
            TaxRate::Exempt => self.k_10.as_deref(),
            TaxRate::Zero => self.k_13.as_deref(),
            TaxRate::Reduced5 => self.k_15.as_deref(),
            TaxRate::Reduced8 => self.k_17.as_deref(),
            TaxRate::Standard23 => self.k_19.as_deref(),
        }
    }

    /// Tax due column for `rate`. Always `None` for exempt and 0%.
    pub fn tax_due(&self, rate: TaxRate) -> Option<&str> {
        match rate {
            TaxRate::Exempt | TaxRate::Zero => None,
            TaxRate::Reduced5 => self.k_16.as_deref(),
            TaxRate::Reduced8 => self.k_18.as_deref(),
            TaxRate::Standard23 => self.k_20.as_deref(),
        }
    }

    /// Present tax due values (K_16, K_18, K_20) in column order.
    pub fn tax_due_fields(&self) -> impl Iterator<Item = &str> {
        [&self.k_16, &self.k_18, &self.k_20]
            .into_iter()
            .filter_map(|f| f.as_deref())
    }

    fn set_amounts(&mut self, rate: TaxRate, net: String, tax_due: Option<String>) {
        match rate {
            TaxRate::Exempt => self.k_10 = Some(net),
            TaxRate::Zero => self.k_13 = Some(net),
            TaxRate::Reduced5 => {
                self.k_15 = Some(net);
                self.k_16 = tax_due;
            }
            TaxRate::Reduced8 => {
                self.k_17 = Some(net);
                self.k_18 = tax_due;
            }
            TaxRate::Standard23 => {
                self.k_19 = Some(net);
                self.k_20 = tax_due;
            }
        }
    }

    /// Field mapping for the `tns:SprzedazWiersz` element.
    pub fn to_fields(&self) -> FieldMap {
        let mut f = FieldMap::new()
            .with("tns:LpSprzedazy", self.number)
            .with("tns:NrKontrahenta", self.counterparty_code.as_str())
            .with("tns:NazwaKontrahenta", self.counterparty_name.as_str())
            .with("tns:AdresKontrahenta", self.counterparty_address.as_str())
            .with("tns:DowodSprzedazy", self.document_number.as_str())
            .with(
                "tns:DataWystawienia",
                self.issue_date.format("%Y-%m-%d").to_string(),
            );
        f.insert_opt("tns:K_10", self.k_10.as_deref());
        f.insert_opt("tns:K_13", self.k_13.as_deref());
        f.insert_opt("tns:K_15", self.k_15.as_deref());
        f.insert_opt("tns:K_16", self.k_16.as_deref());
        f.insert_opt("tns:K_17", self.k_17.as_deref());
        f.insert_opt("tns:K_18", self.k_18.as_deref());
        f.insert_opt("tns:K_19", self.k_19.as_deref());
        f.insert_opt("tns:K_20", self.k_20.as_deref());
        f
    }
}

/// Map invoices to register rows, one per invoice, in the given order.
pub fn prepare_sales(invoices: &[Invoice]) -> Vec<SalesRow> {
    invoices.iter().map(prepare_row).collect()
}

/// Build the register row for a single invoice.
pub fn prepare_row(invoice: &Invoice) -> SalesRow {
    let order = &invoice.order;
    let mut row = SalesRow {
        number: invoice.id,
        counterparty_code: super::COUNTERPARTY_NONE.to_string(),
        counterparty_name: order.owner_name.clone(),
        counterparty_address: buyer_address(order),
        document_number: invoice.number.clone(),
        issue_date: invoice.create_date,
        k_10: None,
        k_13: None,
        k_15: None,
        k_16: None,
        k_17: None,
        k_18: None,
        k_19: None,
        k_20: None,
    };

    let buckets = TaxBuckets::from_products(&order.products);
    for rate in TaxRate::ALL {
        let raw = buckets.get(rate);
        let formatted = format_amount(raw);
        // Positivity is judged on the amount as it will be reported.
        let net = match parse_amount(&formatted) {
            Some(n) if n > Decimal::ZERO => n,
            _ => {
                if raw > Decimal::ZERO {
                    tracing::warn!(
                        invoice = %invoice.number,
                        rate = %rate,
                        amount = %raw,
                        "net amount rounds to zero, column omitted"
                    );
                }
                continue;
            }
        };
        let due = rate
            .taxed_percent()
            .map(|percent| format_amount(tax_due(net, percent)));
        row.set_amounts(rate, formatted, due);
    }

    row
}

/// `"{country}, {postcode} {city}, {street}"`, missing parts left empty.
pub fn buyer_address(order: &Order) -> String {
    format!(
        "{}, {} {}, {}",
        order.country.as_deref().unwrap_or(""),
        order.postcode.as_deref().unwrap_or(""),
        order.city.as_deref().unwrap_or(""),
        order.street.as_deref().unwrap_or(""),
    )
}

/// Tax due on a net amount: `round(net + net * percent / 100, 2) - net`.
pub fn tax_due(net: Decimal, percent: Decimal) -> Decimal {
    let gross = round_amount(net + net * percent / Decimal::ONE_HUNDRED);
    gross - net
}
