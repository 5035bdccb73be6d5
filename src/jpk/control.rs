//! Sales register control totals (SprzedazCtrl).

use rust_decimal::Decimal;

use super::fields::FieldMap;
use super::sales::SalesRow;
use crate::core::{format_amount, parse_amount};

/// Row count and total tax due of the sales register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalesControl {
    pub row_count: usize,
    pub tax_due_total: Decimal,
}

impl SalesControl {
    /// Field mapping for the `tns:SprzedazCtrl` element.
    pub fn to_fields(&self) -> FieldMap {
        FieldMap::new()
            .with("tns:LiczbaWierszySprzedazy", self.row_count)
            .with("tns:PodatekNalezny", format_amount(self.tax_due_total))
    }
}

/// Count rows and sum every reported tax due value (K_16, K_18, K_20).
pub fn prepare_control(rows: &[SalesRow]) -> SalesControl {
    let tax_due_total = rows
        .iter()
        .flat_map(SalesRow::tax_due_fields)
        .filter_map(parse_amount)
        .sum();
    SalesControl {
        row_count: rows.len(),
        tax_due_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Invoice, InvoiceBuilder, OrderBuilder};
    use crate::jpk::sales::prepare_sales;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn invoice(id: u64, products: &[(Decimal, &str)]) -> Invoice {
        let mut order = OrderBuilder::new("Klient");
        for (price, rate) in products {
            order = order.product(*price, *rate);
        }
        InvoiceBuilder::new(id, format!("FV/{id}"), NaiveDate::from_ymd_opt(2021, 3, 1).unwrap())
            .order(order.build())
            .build()
    }

    #[test]
    fn empty_register() {
        let ctrl = prepare_control(&[]);
        assert_eq!(ctrl.row_count, 0);
        assert_eq!(ctrl.tax_due_total, Decimal::ZERO);
        assert_eq!(
            ctrl.to_fields().get_text("tns:PodatekNalezny"),
            Some("0,00")
        );
    }

    #[test]
    fn sums_all_tax_due_columns() {
        let rows = prepare_sales(&[
            invoice(1, &[(dec!(100), "23"), (dec!(50), "zw")]),
            invoice(2, &[(dec!(10), "8"), (dec!(20), "5")]),
            invoice(3, &[(dec!(7), "0")]),
        ]);
        let ctrl = prepare_control(&rows);
        assert_eq!(ctrl.row_count, 3);
        // 23.00 + 0.80 + 1.00
        assert_eq!(ctrl.tax_due_total, dec!(24.80));
        let fields = ctrl.to_fields();
        assert_eq!(fields.get_text("tns:LiczbaWierszySprzedazy"), Some("3"));
        assert_eq!(fields.get_text("tns:PodatekNalezny"), Some("24,80"));
    }

    #[test]
    fn grouped_amounts_are_parsed_whole() {
        let rows = prepare_sales(&[
            invoice(1, &[(dec!(10000), "23")]),
            invoice(2, &[(dec!(10000), "23")]),
        ]);
        let ctrl = prepare_control(&rows);
        assert_eq!(ctrl.tax_due_total, dec!(4600));
        assert_eq!(
            ctrl.to_fields().get_text("tns:PodatekNalezny"),
            Some("4.600,00")
        );
    }
}
