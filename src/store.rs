mod flat_file;

pub use flat_file::FlatFileRepository;

use crate::codec::CodecError;
use crate::item::{Distributor, Textbook};

/// 현재 실행 중에 등록된 교과서와 유통사 목록
///
/// 등록 순서가 그대로 유지되며, 화면에 표시되는 1부터 시작하는 번호는 목록의 위치로 정해진다.
///
/// # Example
/// ```
/// use textbook_distribution::item::Distributor;
/// use textbook_distribution::store::RecordStore;
///
/// let mut store = RecordStore::new();
/// store.add_distributor(
///     Distributor::builder()
///         .name("Prosveta".to_owned())
///         .address("Sofia".to_owned())
///         .phone("0888123456".to_owned())
///         .build()
///         .unwrap(),
/// );
///
/// let listed: Vec<(usize, &str)> = store.list_distributors().map(|(i, d)| (i, d.name())).collect();
/// assert_eq!(listed, vec![(1, "Prosveta")]);
/// assert!(store.distributor(0).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    textbooks: Vec<Textbook>,
    distributors: Vec<Distributor>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn textbooks(&self) -> &[Textbook] {
        &self.textbooks
    }

    pub fn distributors(&self) -> &[Distributor] {
        &self.distributors
    }

    pub fn add_textbook(&mut self, textbook: Textbook) {
        self.textbooks.push(textbook);
    }

    pub fn add_distributor(&mut self, distributor: Distributor) {
        self.distributors.push(distributor);
    }

    /// 화면 표시용 (번호, 교과서) 목록, 번호는 1부터 시작한다.
    pub fn list_textbooks(&self) -> impl Iterator<Item = (usize, &Textbook)> {
        self.textbooks.iter().enumerate().map(|(i, t)| (i + 1, t))
    }

    pub fn list_distributors(&self) -> impl Iterator<Item = (usize, &Distributor)> {
        self.distributors.iter().enumerate().map(|(i, d)| (i + 1, d))
    }

    /// 1부터 시작하는 번호로 교과서를 찾는다.
    pub fn textbook(&self, number: usize) -> Option<&Textbook> {
        number.checked_sub(1).and_then(|i| self.textbooks.get(i))
    }

    /// 1부터 시작하는 번호로 유통사를 찾는다.
    pub fn distributor(&self, number: usize) -> Option<&Distributor> {
        number.checked_sub(1).and_then(|i| self.distributors.get(i))
    }

    /// 두 목록을 한번에 교체한다.
    pub fn replace_all(&mut self, textbooks: Vec<Textbook>, distributors: Vec<Distributor>) {
        self.textbooks = textbooks;
        self.distributors = distributors;
    }

    pub fn into_parts(self) -> (Vec<Textbook>, Vec<Distributor>) {
        (self.textbooks, self.distributors)
    }
}

/// 레코드 저장소
pub trait RecordRepository {

    /// 전달 받은 레코드 전체를 저장소에 기록한다.
    fn save(&self, store: &RecordStore) -> Result<(), CodecError>;

    /// 저장소의 레코드를 읽어 `store`의 내용을 교체한다.
    /// 실패할 경우 `store`는 변경되지 않는다.
    fn load(&self, store: &mut RecordStore) -> Result<(), CodecError>;
}
