pub mod validate;

use crate::item::validate::{
    validate_approval_date, validate_date, validate_non_empty, validate_phone,
    validate_positive_int, validate_positive_real,
};
use std::fmt;
use std::fmt::{Display, Formatter};

/// 도서/유통사의 필드 구분
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Field {
    Title,
    Author,
    Edition,
    Isbn,
    PublishDate,
    Circulation,
    ApprovalDate,
    Price,
    Name,
    Address,
    Phone,
}

impl Field {
    /// 에러 메시지에 사용할 필드 이름
    pub fn label(&self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Author => "Author",
            Field::Edition => "Edition",
            Field::Isbn => "ISBN",
            Field::PublishDate => "Publish date",
            Field::Circulation => "Circulation",
            Field::ApprovalDate => "Approval date",
            Field::Price => "Price",
            Field::Name => "Name",
            Field::Address => "Address",
            Field::Phone => "Phone number",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Item 모듈에서 사용할 에러 열거
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    /// 필드 값이 유효성 검사를 통과하지 못함
    #[error("{reason}")]
    InvalidField { field: Field, reason: String },
}

impl ItemError {
    pub fn invalid_field(field: Field, reason: impl Into<String>) -> Self {
        ItemError::InvalidField { field, reason: reason.into() }
    }

    /// 유효성 검사에 실패한 필드
    pub fn field(&self) -> Field {
        match self {
            ItemError::InvalidField { field, .. } => *field,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            ItemError::InvalidField { reason, .. } => reason,
        }
    }
}

/// 교과서
///
/// [`TextbookBuilder::build`]를 통해서만 생성되며 생성 이후에는 변경할 수 없다.
#[derive(Debug, Clone, PartialEq)]
pub struct Textbook {
    title: String,
    author: String,
    edition: i32,
    isbn: String,
    publish_date: String,
    circulation: i32,
    approved: bool,
    approval_date: String,
    price: f64,
}

impl Textbook {
    pub fn builder() -> TextbookBuilder {
        TextbookBuilder::new()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn edition(&self) -> i32 {
        self.edition
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn publish_date(&self) -> &str {
        &self.publish_date
    }

    pub fn circulation(&self) -> i32 {
        self.circulation
    }

    pub fn is_approved(&self) -> bool {
        self.approved
    }

    pub fn approval_date(&self) -> &str {
        &self.approval_date
    }

    pub fn price(&self) -> f64 {
        self.price
    }
}

/// 화면 출력과 파일 저장에 공통으로 사용하는 9줄 형식
impl Display for Textbook {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Author: {}", self.author)?;
        writeln!(f, "Edition: {}", self.edition)?;
        writeln!(f, "ISBN: {}", self.isbn)?;
        writeln!(f, "Publish Date: {}", self.publish_date)?;
        writeln!(f, "Circulation: {}", self.circulation)?;
        writeln!(f, "Approved: {}", if self.approved { "Yes" } else { "No" })?;
        writeln!(f, "Approval Date: {}", self.approval_date)?;
        writeln!(f, "Price: {}", self.price)
    }
}

/// Textbook 빌더
///
/// 설정되지 않은 값은 빈 문자열, 0, `false`로 취급되어 유효성 검사에서 걸러진다.
///
/// # Example
/// ```
/// use textbook_distribution::item::{Field, Textbook};
///
/// let textbook = Textbook::builder()
///     .title("Abstract Algebra".to_owned())
///     .author("Dummit".to_owned())
///     .edition(3)
///     .isbn("978-0471433347".to_owned())
///     .publish_date("14.07.2003".to_owned())
///     .circulation(1000)
///     .approved(false)
///     .price(89.5)
///     .build()
///     .unwrap();
/// assert_eq!(textbook.title(), "Abstract Algebra");
///
/// let err = Textbook::builder().build().unwrap_err();
/// assert_eq!(err.field(), Field::Title);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextbookBuilder {
    title: Option<String>,
    author: Option<String>,
    edition: Option<i32>,
    isbn: Option<String>,
    publish_date: Option<String>,
    circulation: Option<i32>,
    approved: bool,
    approval_date: Option<String>,
    price: Option<f64>,
}

impl TextbookBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: String) -> Self {
        self.title = Some(title);
        self
    }

    pub fn author(mut self, author: String) -> Self {
        self.author = Some(author);
        self
    }

    pub fn edition(mut self, edition: i32) -> Self {
        self.edition = Some(edition);
        self
    }

    pub fn isbn(mut self, isbn: String) -> Self {
        self.isbn = Some(isbn);
        self
    }

    pub fn publish_date(mut self, publish_date: String) -> Self {
        self.publish_date = Some(publish_date);
        self
    }

    pub fn circulation(mut self, circulation: i32) -> Self {
        self.circulation = Some(circulation);
        self
    }

    pub fn approved(mut self, approved: bool) -> Self {
        self.approved = approved;
        self
    }

    pub fn approval_date(mut self, approval_date: String) -> Self {
        self.approval_date = Some(approval_date);
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// 제목, 저자, 판, ISBN, 출판일, 발행 부수, 승인일, 가격 순서로 검사하며
    /// 처음 실패한 필드의 에러를 반환한다.
    pub fn build(self) -> Result<Textbook, ItemError> {
        let title = self.title.unwrap_or_default();
        validate_non_empty(Field::Title, &title)?;

        let author = self.author.unwrap_or_default();
        validate_non_empty(Field::Author, &author)?;

        let edition = self.edition.unwrap_or(0);
        validate_positive_int(Field::Edition, edition)?;

        let isbn = self.isbn.unwrap_or_default();
        validate_non_empty(Field::Isbn, &isbn)?;

        let publish_date = self.publish_date.unwrap_or_default();
        validate_date(Field::PublishDate, &publish_date)?;

        let circulation = self.circulation.unwrap_or(0);
        validate_positive_int(Field::Circulation, circulation)?;

        let approval_date = self.approval_date.unwrap_or_default();
        validate_approval_date(&approval_date, self.approved)?;

        let price = self.price.unwrap_or(0.0);
        validate_positive_real(Field::Price, price)?;

        Ok(Textbook {
            title,
            author,
            edition,
            isbn,
            publish_date,
            circulation,
            approved: self.approved,
            approval_date,
            price,
        })
    }
}

/// 유통사
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Distributor {
    name: String,
    address: String,
    phone: String,
}

impl Distributor {
    pub fn builder() -> DistributorBuilder {
        DistributorBuilder::new()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

impl Display for Distributor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Address: {}", self.address)?;
        writeln!(f, "Phone: {}", self.phone)
    }
}

/// Distributor 빌더
#[derive(Debug, Clone, Default)]
pub struct DistributorBuilder {
    name: Option<String>,
    address: Option<String>,
    phone: Option<String>,
}

impl DistributorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    pub fn address(mut self, address: String) -> Self {
        self.address = Some(address);
        self
    }

    pub fn phone(mut self, phone: String) -> Self {
        self.phone = Some(phone);
        self
    }

    pub fn build(self) -> Result<Distributor, ItemError> {
        let name = self.name.unwrap_or_default();
        validate_non_empty(Field::Name, &name)?;

        let address = self.address.unwrap_or_default();
        validate_non_empty(Field::Address, &address)?;

        let phone = self.phone.unwrap_or_default();
        validate_phone(&phone)?;

        Ok(Distributor { name, address, phone })
    }
}
