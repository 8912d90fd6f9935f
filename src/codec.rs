//! 레코드 저장 파일 형식
//!
//! ```text
//! Textbooks:
//! Title: <제목>
//! Author: <저자>
//! Edition: <판>
//! ISBN: <ISBN>
//! Publish Date: <DD.MM.YYYY>
//! Circulation: <발행 부수>
//! Approved: Yes|No
//! Approval Date: <DD.MM.YYYY 또는 빈 값>
//! Price: <가격>
//! <빈 줄>
//! Distributors:
//! Name: <이름>
//! Address: <주소>
//! Phone: <전화번호>
//! <빈 줄>
//! ```
//!
//! 값은 라벨 뒤 첫 번째 공백 이후의 문자열이며, 라벨 자체에 공백이 있는 날짜 줄은 두 번째 공백 이후의 문자열이다.
//! 값에 줄바꿈이 포함되면 파일을 다시 읽을 수 없다.

mod decode;

pub use decode::decode;

use crate::item::{Field, ItemError};
use crate::store::RecordStore;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

pub const TEXTBOOKS_HEADER: &str = "Textbooks:";
pub const DISTRIBUTORS_HEADER: &str = "Distributors:";

/// 저장/불러오기 중 발생한 에러 열거
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// 파일을 열거나 읽고 쓰지 못함
    #[error("file access failed: {0}")]
    Io(#[from] std::io::Error),

    /// `Distributors:` 줄을 찾기 전에 파일이 끝남
    #[error("input ended before the \"Distributors:\" line")]
    MissingTerminator,

    /// 레코드 중간에 파일이 끝남
    #[error("line {line}: input ended while expecting {expected}")]
    UnexpectedEof { line: usize, expected: &'static str },

    /// 숫자 필드를 해석하지 못함
    #[error("line {line}: {field} is not a number: {value:?}")]
    InvalidNumber { line: usize, field: Field, value: String },

    /// 읽어온 레코드가 유효성 검사를 통과하지 못함
    #[error("record starting at line {line} is invalid: {source}")]
    InvalidRecord { line: usize, source: ItemError },
}

/// 전체 레코드를 파일 형식의 문자열로 변환한다.
///
/// # Example
/// ```
/// use textbook_distribution::codec::{decode, encode};
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
/// let text = encode(&store);
/// assert_eq!(text, "Textbooks:\nDistributors:\nName: Prosveta\nAddress: Sofia\nPhone: 0888123456\n\n");
/// assert_eq!(decode(&text).unwrap(), store);
/// ```
pub fn encode(store: &RecordStore) -> String {
    FileFormat(store).to_string()
}

/// [`RecordStore`]의 파일 형식 표현
struct FileFormat<'a>(&'a RecordStore);

impl Display for FileFormat<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", TEXTBOOKS_HEADER)?;
        for textbook in self.0.textbooks() {
            writeln!(f, "{}", textbook)?;
        }

        writeln!(f, "{}", DISTRIBUTORS_HEADER)?;
        for distributor in self.0.distributors() {
            writeln!(f, "{}", distributor)?;
        }
        Ok(())
    }
}

/// 레코드 전체를 `path`에 기록한다. 기존 파일은 덮어쓴다.
pub fn save(path: impl AsRef<Path>, store: &RecordStore) -> Result<(), CodecError> {
    fs::write(path, encode(store))?;
    Ok(())
}

/// `path`의 레코드를 읽어 `store`를 교체한다.
/// 파일 전체를 해석하고 검증한 이후에만 교체되며, 실패시 `store`는 그대로 유지된다.
pub fn load(path: impl AsRef<Path>, store: &mut RecordStore) -> Result<(), CodecError> {
    let text = fs::read_to_string(path)?;
    let (textbooks, distributors) = decode(&text)?.into_parts();
    store.replace_all(textbooks, distributors);
    Ok(())
}
