//! Order totals in `Decimal` so repeated additions stay exact.
//!
//! Both functions return `None` when the result does not fit in a `Decimal`.

use rust_decimal::Decimal;

use crate::services::access::types::OrderLine;

pub fn subtotal(line: &OrderLine) -> Option<Decimal> {
    line.unit_price.checked_mul(Decimal::from(line.quantity))
}

pub fn total(lines: &[OrderLine]) -> Option<Decimal> {
    lines
        .iter()
        .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(subtotal(line)?))
}
