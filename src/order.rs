use crate::item::{Distributor, Textbook};
use crate::store::RecordStore;

/// 주문 중 발생한 에러 열거
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    /// 교과서나 유통사가 하나도 등록되지 않음
    #[error("add distributors and textbooks before placing an order")]
    PreconditionNotMet,

    /// 목록에 없는 번호를 선택함
    #[error("invalid selection: {0}")]
    InvalidSelection(usize),
}

/// 진행 중인 주문
///
/// 선택 번호는 모두 화면에 표시된 1부터 시작하는 번호이다.
pub struct Order<'a> {
    store: &'a RecordStore,
    distributor: &'a Distributor,
    lines: Vec<&'a Textbook>,
    rejected: Vec<usize>,
}

impl<'a> Order<'a> {

    /// 교과서와 유통사가 모두 한 개 이상 등록되어 있는지 확인한다.
    pub fn check_preconditions(store: &RecordStore) -> Result<(), OrderError> {
        if store.textbooks().is_empty() || store.distributors().is_empty() {
            return Err(OrderError::PreconditionNotMet);
        }
        Ok(())
    }

    /// 유통사를 선택하여 주문을 시작한다.
    /// 교과서와 유통사가 모두 한 개 이상 있어야 한다.
    pub fn start(store: &'a RecordStore, distributor_number: usize) -> Result<Self, OrderError> {
        Self::check_preconditions(store)?;

        let distributor = store
            .distributor(distributor_number)
            .ok_or(OrderError::InvalidSelection(distributor_number))?;

        Ok(Self {
            store,
            distributor,
            lines: Vec::new(),
            rejected: Vec::new(),
        })
    }

    /// 교과서를 주문에 추가한다. 같은 교과서를 여러번 추가할 수 있다.
    /// 목록에 없는 번호는 거절 목록에 기록되고 주문은 계속 진행된다.
    pub fn add(&mut self, textbook_number: usize) -> Result<&'a Textbook, OrderError> {
        match self.store.textbook(textbook_number) {
            Some(textbook) => {
                self.lines.push(textbook);
                Ok(textbook)
            }
            None => {
                self.rejected.push(textbook_number);
                Err(OrderError::InvalidSelection(textbook_number))
            }
        }
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(|t| t.price()).sum()
    }

    pub fn finish(self) -> OrderReceipt<'a> {
        let total = self.total();
        OrderReceipt {
            distributor: self.distributor,
            lines: self.lines,
            rejected: self.rejected,
            total,
        }
    }
}

/// 완료된 주문 내역
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReceipt<'a> {
    distributor: &'a Distributor,
    lines: Vec<&'a Textbook>,
    rejected: Vec<usize>,
    total: f64,
}

impl<'a> OrderReceipt<'a> {
    pub fn distributor(&self) -> &'a Distributor {
        self.distributor
    }

    pub fn lines(&self) -> &[&'a Textbook] {
        &self.lines
    }

    /// 목록에 없어 건너뛴 교과서 번호
    pub fn rejected(&self) -> &[usize] {
        &self.rejected
    }

    pub fn total(&self) -> f64 {
        self.total
    }
}

/// 선택한 교과서들의 가격 합계를 계산한다.
///
/// # Example
/// ```
/// use textbook_distribution::item::{Distributor, Textbook};
/// use textbook_distribution::order::place_order;
/// use textbook_distribution::store::RecordStore;
///
/// let mut store = RecordStore::new();
/// for (title, price) in [("A", 10.0), ("B", 20.0), ("C", 30.0)] {
///     store.add_textbook(
///         Textbook::builder()
///             .title(title.to_owned())
///             .author("Author".to_owned())
///             .edition(1)
///             .isbn("isbn".to_owned())
///             .publish_date("01.01.2024".to_owned())
///             .circulation(100)
///             .price(price)
///             .build()
///             .unwrap(),
///     );
/// }
/// store.add_distributor(
///     Distributor::builder()
///         .name("Prosveta".to_owned())
///         .address("Sofia".to_owned())
///         .phone("0888123456".to_owned())
///         .build()
///         .unwrap(),
/// );
///
/// let receipt = place_order(&store, 1, &[1, 1, 3]).unwrap();
/// assert_eq!(receipt.total(), 50.0);
/// ```
pub fn place_order<'a>(
    store: &'a RecordStore,
    distributor_number: usize,
    textbook_numbers: &[usize],
) -> Result<OrderReceipt<'a>, OrderError> {
    let mut order = Order::start(store, distributor_number)?;
    for &number in textbook_numbers {
        order.add(number).ok();
    }
    Ok(order.finish())
}
