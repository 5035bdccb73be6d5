use chrono::NaiveDate;
use jpk_vat::core::*;
use jpk_vat::jpk::{JpkConfigBuilder, JpkVatGenerator};
use rust_decimal_macros::dec;

fn main() {
    let march = |d| NaiveDate::from_ymd_opt(2021, 3, d).expect("valid date");

    let repo = InMemoryInvoiceRepository::new(vec![
        InvoiceBuilder::new(1, "FV/2021/03/001", march(3))
            .order(
                OrderBuilder::new("Anna Nowak")
                    .country("Polska")
                    .postcode("00-950")
                    .city("Warszawa")
                    .street("ul. Prosta 1")
                    .product(dec!(100.00), "23")
                    .product(dec!(50.00), "zw")
                    .build(),
            )
            .build(),
        InvoiceBuilder::new(2, "FV/2021/03/002", march(17))
            .order(
                OrderBuilder::new("Jan Kowalski")
                    .city("Kraków")
                    .product(dec!(10.00), "8")
                    .product(dec!(20.00), "5")
                    .build(),
            )
            .build(),
    ]);

    let config = JpkConfigBuilder::new("123-456-78-90", "Sklep Internetowy Sp. z o.o.")
        .email("jpk@sklep.pl")
        .system_name("Sklep 2.1")
        .build();

    let reference = std::env::args().nth(1).unwrap_or_else(|| "2021-03-01".into());
    let xml = JpkVatGenerator::new(repo, config)
        .generate_for_str(&reference)
        .expect("JPK_VAT generation failed");

    println!("{xml}");
}
