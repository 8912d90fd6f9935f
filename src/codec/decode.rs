use crate::codec::{CodecError, DISTRIBUTORS_HEADER};
use crate::item::{Distributor, Field, Textbook};
use crate::store::RecordStore;
use std::str::Lines;

/// 줄 번호를 함께 추적하는 줄 단위 리더
struct LineReader<'a> {
    lines: Lines<'a>,
    line_no: usize,
}

impl<'a> LineReader<'a> {
    fn new(text: &'a str) -> Self {
        Self { lines: text.lines(), line_no: 0 }
    }

    /// 마지막으로 읽은 줄의 번호 (1부터 시작)
    fn line_no(&self) -> usize {
        self.line_no
    }

    fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.next()?;
        self.line_no += 1;
        Some(line)
    }

    fn expect_line(&mut self, expected: &'static str) -> Result<&'a str, CodecError> {
        self.next_line().ok_or(CodecError::UnexpectedEof {
            line: self.line_no + 1,
            expected,
        })
    }

    /// 레코드 뒤의 구분 줄을 읽는다. 빈 줄인지 확인하지 않으며 파일 끝이면 `None`.
    fn read_separator(&mut self) -> Option<&'a str> {
        self.next_line()
    }
}

/// 첫 번째 공백 이후의 문자열, 공백이 없으면 줄 전체
fn after_first_space(line: &str) -> &str {
    line.split_once(' ').map_or(line, |(_, value)| value)
}

/// 두 번째 공백 이후의 문자열, 공백이 두 개 미만이면 줄 전체
fn after_second_space(line: &str) -> &str {
    line.match_indices(' ')
        .nth(1)
        .map_or(line, |(i, _)| &line[i + 1..])
}

fn parse_int(reader: &LineReader, field: Field, value: &str) -> Result<i32, CodecError> {
    value.parse().map_err(|_| CodecError::InvalidNumber {
        line: reader.line_no(),
        field,
        value: value.to_owned(),
    })
}

fn parse_real(reader: &LineReader, field: Field, value: &str) -> Result<f64, CodecError> {
    value.parse().map_err(|_| CodecError::InvalidNumber {
        line: reader.line_no(),
        field,
        value: value.to_owned(),
    })
}

fn read_textbook(title_line: &str, reader: &mut LineReader) -> Result<Textbook, CodecError> {
    let start = reader.line_no();

    let title = after_first_space(title_line);
    let author = after_first_space(reader.expect_line("Author")?);

    let edition = after_first_space(reader.expect_line("Edition")?);
    let edition = parse_int(reader, Field::Edition, edition)?;

    let isbn = after_first_space(reader.expect_line("ISBN")?);
    let publish_date = after_second_space(reader.expect_line("Publish Date")?);

    let circulation = after_first_space(reader.expect_line("Circulation")?);
    let circulation = parse_int(reader, Field::Circulation, circulation)?;

    let approved = after_first_space(reader.expect_line("Approved")?) == "Yes";
    let approval_date = after_second_space(reader.expect_line("Approval Date")?);

    let price = after_first_space(reader.expect_line("Price")?);
    let price = parse_real(reader, Field::Price, price)?;

    Textbook::builder()
        .title(title.to_owned())
        .author(author.to_owned())
        .edition(edition)
        .isbn(isbn.to_owned())
        .publish_date(publish_date.to_owned())
        .circulation(circulation)
        .approved(approved)
        .approval_date(approval_date.to_owned())
        .price(price)
        .build()
        .map_err(|source| CodecError::InvalidRecord { line: start, source })
}

fn read_distributor(name_line: &str, reader: &mut LineReader) -> Result<Distributor, CodecError> {
    let start = reader.line_no();

    let name = after_first_space(name_line);
    let address = after_first_space(reader.expect_line("Address")?);
    let phone = after_first_space(reader.expect_line("Phone")?);

    Distributor::builder()
        .name(name.to_owned())
        .address(address.to_owned())
        .phone(phone.to_owned())
        .build()
        .map_err(|source| CodecError::InvalidRecord { line: start, source })
}

/// 파일 형식의 문자열을 읽어 새 [`RecordStore`]를 만든다.
///
/// 첫 줄은 확인 없이 건너뛰고, `Distributors:` 줄이 나올 때까지 9줄 + 구분 줄 단위로 교과서를 읽는다.
/// 구분 줄 자리에 `Distributors:`가 와도 교과서 목록이 끝난다.
/// 이후 파일 끝까지 3줄 + 구분 줄 단위로 유통사를 읽는다.
pub fn decode(text: &str) -> Result<RecordStore, CodecError> {
    let mut reader = LineReader::new(text);
    let mut store = RecordStore::new();

    reader.next_line();

    loop {
        let line = reader.next_line().ok_or(CodecError::MissingTerminator)?;
        if line == DISTRIBUTORS_HEADER {
            break;
        }
        store.add_textbook(read_textbook(line, &mut reader)?);
        if reader.read_separator() == Some(DISTRIBUTORS_HEADER) {
            break;
        }
    }

    while let Some(line) = reader.next_line() {
        store.add_distributor(read_distributor(line, &mut reader)?);
        reader.read_separator();
    }

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode;

    const SAMPLE: &str = "Textbooks:\n\
        Title: Abstract Algebra\n\
        Author: David Dummit\n\
        Edition: 3\n\
        ISBN: 978-0471433347\n\
        Publish Date: 14.07.2003\n\
        Circulation: 1200\n\
        Approved: Yes\n\
        Approval Date: 01.09.2004\n\
        Price: 89.5\n\
        \n\
        Title: Calculus\n\
        Author: Spivak\n\
        Edition: 4\n\
        ISBN: 978-0914098911\n\
        Publish Date: 01.01.2008\n\
        Circulation: 300\n\
        Approved: No\n\
        Approval Date: \n\
        Price: 60\n\
        \n\
        Distributors:\n\
        Name: Prosveta\n\
        Address: Sofia, Tsarigradsko shose 117\n\
        Phone: +359888123456\n\
        \n";

    #[test]
    fn splits_on_first_or_second_space() {
        assert_eq!(after_first_space("Title: Abstract Algebra"), "Abstract Algebra");
        assert_eq!(after_first_space("NoSpace"), "NoSpace");
        assert_eq!(after_second_space("Publish Date: 14.07.2003"), "14.07.2003");
        assert_eq!(after_second_space("Approval Date: "), "");
        assert_eq!(after_second_space("Date: 14.07.2003"), "Date: 14.07.2003");
    }

    #[test]
    fn decodes_sample_file() {
        let store = decode(SAMPLE).unwrap();

        assert_eq!(store.textbooks().len(), 2);
        let algebra = &store.textbooks()[0];
        assert_eq!(algebra.title(), "Abstract Algebra");
        assert_eq!(algebra.author(), "David Dummit");
        assert_eq!(algebra.edition(), 3);
        assert_eq!(algebra.publish_date(), "14.07.2003");
        assert!(algebra.is_approved());
        assert_eq!(algebra.approval_date(), "01.09.2004");
        assert_eq!(algebra.price(), 89.5);

        let calculus = &store.textbooks()[1];
        assert!(!calculus.is_approved());
        assert_eq!(calculus.approval_date(), "");
        assert_eq!(calculus.price(), 60.0);

        assert_eq!(store.distributors().len(), 1);
        assert_eq!(store.distributors()[0].address(), "Sofia, Tsarigradsko shose 117");
    }

    #[test]
    fn decode_is_inverse_of_encode() {
        let store = decode(SAMPLE).unwrap();
        assert_eq!(encode(&store), SAMPLE);
    }

    #[test]
    fn empty_store() {
        let store = decode("Textbooks:\nDistributors:\n").unwrap();
        assert_eq!(store, RecordStore::new());
    }

    #[test]
    fn missing_terminator_fails() {
        let text = &SAMPLE[..SAMPLE.find("Distributors:").unwrap()];
        assert!(matches!(decode(text), Err(CodecError::MissingTerminator)));
        assert!(matches!(decode(""), Err(CodecError::MissingTerminator)));
        assert!(matches!(decode("Textbooks:\n"), Err(CodecError::MissingTerminator)));
    }

    #[test]
    fn header_line_is_not_checked() {
        let text = SAMPLE.replacen("Textbooks:", "whatever", 1);
        assert_eq!(decode(&text).unwrap().textbooks().len(), 2);
    }

    #[test]
    fn anything_but_yes_is_not_approved() {
        let text = SAMPLE
            .replace("Approved: Yes", "Approved: yes")
            .replace("Approval Date: 01.09.2004", "Approval Date: ");
        let store = decode(&text).unwrap();
        assert!(!store.textbooks()[0].is_approved());
    }

    #[test]
    fn truncated_textbook_reports_position() {
        let text = "Textbooks:\nTitle: A\nAuthor: B\nEdition: 1\n";
        match decode(text) {
            Err(CodecError::UnexpectedEof { line, expected }) => {
                assert_eq!(line, 5);
                assert_eq!(expected, "ISBN");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn truncated_distributor_fails() {
        let text = "Textbooks:\nDistributors:\nName: Prosveta\n";
        assert!(matches!(
            decode(text),
            Err(CodecError::UnexpectedEof { expected: "Address", .. })
        ));
    }

    #[test]
    fn non_numeric_edition_fails() {
        let text = SAMPLE.replace("Edition: 3", "Edition: third");
        match decode(&text) {
            Err(CodecError::InvalidNumber { line, field, value }) => {
                assert_eq!(line, 4);
                assert_eq!(field, Field::Edition);
                assert_eq!(value, "third");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn hand_edited_invalid_record_is_rejected() {
        let text = SAMPLE.replace("Phone: +359888123456", "Phone: 12345");
        match decode(&text) {
            Err(CodecError::InvalidRecord { line, source }) => {
                assert_eq!(line, 23);
                assert_eq!(source.field(), Field::Phone);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn separator_content_is_ignored() {
        let text = SAMPLE.replace("Price: 89.5\n\n", "Price: 89.5\n---\n");
        assert_eq!(decode(&text).unwrap().textbooks().len(), 2);
    }

    #[test]
    fn terminator_in_place_of_separator_ends_textbooks() {
        let text = "Textbooks:\n\
            Title: Calculus\n\
            Author: Spivak\n\
            Edition: 4\n\
            ISBN: 978-0914098911\n\
            Publish Date: 01.01.2008\n\
            Circulation: 300\n\
            Approved: No\n\
            Approval Date: \n\
            Price: 60\n\
            Distributors:\n\
            Name: Prosveta\n\
            Address: Sofia\n\
            Phone: 0888123456\n\
            \n";

        let store = decode(text).unwrap();

        assert_eq!(store.textbooks().len(), 1);
        assert_eq!(store.textbooks()[0].title(), "Calculus");
        assert_eq!(store.distributors().len(), 1);
        assert_eq!(store.distributors()[0].name(), "Prosveta");
    }

    #[test]
    fn missing_final_separator_is_tolerated() {
        let text = SAMPLE.trim_end_matches('\n');
        assert_eq!(decode(text).unwrap().distributors().len(), 1);
    }
}
