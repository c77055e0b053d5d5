use crate::entity::{
    BookId, CustomerId, OrderDraft, OrderLine, OrderSourceId, OrderTotal, Price, SourceLine,
};
use crate::KernelError;
use error_stack::{Context, Report};
use rust_decimal::Decimal;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AssembleError {
    EmptySource,
    InvalidLineItem,
    ReferenceNotFound,
    InvalidPrice,
}

impl AssembleError {
    pub fn kind(&self) -> KernelError {
        match self {
            AssembleError::ReferenceNotFound => KernelError::NotFound,
            AssembleError::EmptySource
            | AssembleError::InvalidLineItem
            | AssembleError::InvalidPrice => KernelError::Validation,
        }
    }
}

impl Display for AssembleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AssembleError::EmptySource => write!(f, "Order source has no items"),
            AssembleError::InvalidLineItem => write!(f, "Order source contains an invalid line"),
            AssembleError::ReferenceNotFound => write!(f, "Book referenced by a line not found"),
            AssembleError::InvalidPrice => write!(f, "Book has a negative price"),
        }
    }
}

impl Context for AssembleError {}

/// Prices `lines` against `lookup` and builds the order header and lines.
///
/// Lines are checked in order and the first failure wins. Each produced line
/// carries the price returned by `lookup` at this moment, so later catalog
/// changes never touch the result.
pub fn assemble<F>(
    customer_id: CustomerId,
    source_id: OrderSourceId,
    lines: &[SourceLine],
    lookup: F,
) -> error_stack::Result<(OrderDraft, Vec<OrderLine>), AssembleError>
where
    F: Fn(&BookId) -> Option<Price>,
{
    if lines.is_empty() {
        return Err(Report::new(AssembleError::EmptySource)
            .attach_printable(format!("source_id: {}", source_id.as_ref())));
    }

    let mut total = Decimal::ZERO;
    let mut priced = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        let book_id = line.book_id();
        let qty = line.qty();
        if !book_id.is_valid() {
            return Err(Report::new(AssembleError::InvalidLineItem)
                .attach_printable(format!("line {index}: book_id {}", book_id.as_ref())));
        }
        if !qty.is_positive() {
            return Err(Report::new(AssembleError::InvalidLineItem)
                .attach_printable(format!("line {index}: qty {}", qty.as_ref())));
        }
        let Some(price) = lookup(book_id) else {
            return Err(Report::new(AssembleError::ReferenceNotFound)
                .attach_printable(format!("line {index}: book_id {}", book_id.as_ref())));
        };
        if price.is_negative() {
            return Err(Report::new(AssembleError::InvalidPrice)
                .attach_printable(format!("line {index}: price {}", price.as_ref())));
        }

        total = price
            .as_ref()
            .checked_mul(Decimal::from(*qty.as_ref()))
            .and_then(|subtotal| total.checked_add(subtotal))
            .ok_or_else(|| {
                Report::new(AssembleError::InvalidLineItem)
                    .attach_printable(format!("line {index}: total overflows"))
            })?;
        priced.push(OrderLine::new(*book_id, *qty, price));
    }

    let draft = OrderDraft::new(customer_id, source_id, OrderTotal::new(total));
    Ok((draft, priced))
}

#[cfg(test)]
mod test {
    use super::{assemble, AssembleError};
    use crate::entity::{BookId, CustomerId, OrderSourceId, Price, Quantity, SourceLine};
    use crate::KernelError;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn catalog() -> HashMap<BookId, Price> {
        HashMap::from([
            (BookId::new(1), Price::new(dec!(10.00))),
            (BookId::new(2), Price::new(dec!(5.50))),
            (BookId::new(3), Price::new(dec!(-1))),
        ])
    }

    fn line(book: i64, qty: i32) -> SourceLine {
        SourceLine::new(BookId::new(book), Quantity::new(qty))
    }

    fn run(lines: &[SourceLine]) -> Result<(), AssembleError> {
        let catalog = catalog();
        assemble(
            CustomerId::new(7),
            OrderSourceId::new(3),
            lines,
            |id| catalog.get(id).copied(),
        )
        .map(|_| ())
        .map_err(|report| *report.current_context())
    }

    #[test]
    fn totals_and_freezes_prices() {
        let mut catalog = catalog();
        let lines = [line(1, 2), line(2, 1)];
        let (draft, priced) = assemble(
            CustomerId::new(7),
            OrderSourceId::new(3),
            &lines,
            |id| catalog.get(id).copied(),
        )
        .unwrap();
        assert_eq!(draft.total().as_ref(), &dec!(25.50));
        assert_eq!(draft.customer_id(), &CustomerId::new(7));
        assert_eq!(draft.source_id(), &OrderSourceId::new(3));
        assert_eq!(priced.len(), 2);
        assert_eq!(priced[0].price(), &Price::new(dec!(10.00)));

        catalog.insert(BookId::new(1), Price::new(dec!(99)));
        assert_eq!(priced[0].price(), &Price::new(dec!(10.00)));
    }

    #[test]
    fn rejects_empty_source() {
        assert_eq!(run(&[]), Err(AssembleError::EmptySource));
    }

    #[test]
    fn rejects_invalid_lines() {
        assert_eq!(run(&[line(0, 1)]), Err(AssembleError::InvalidLineItem));
        assert_eq!(run(&[line(1, 0)]), Err(AssembleError::InvalidLineItem));
        assert_eq!(run(&[line(1, -4)]), Err(AssembleError::InvalidLineItem));
    }

    #[test]
    fn rejects_unknown_book_and_negative_price() {
        assert_eq!(run(&[line(1, 1), line(42, 1)]), Err(AssembleError::ReferenceNotFound));
        assert_eq!(run(&[line(3, 1)]), Err(AssembleError::InvalidPrice));
    }

    #[test]
    fn first_failing_line_wins() {
        assert_eq!(run(&[line(42, 1), line(0, 1)]), Err(AssembleError::ReferenceNotFound));
    }

    #[test]
    fn maps_to_kernel_errors() {
        assert_eq!(AssembleError::ReferenceNotFound.kind(), KernelError::NotFound);
        assert_eq!(AssembleError::EmptySource.kind(), KernelError::Validation);
        assert_eq!(AssembleError::InvalidPrice.kind(), KernelError::Validation);
    }
}
