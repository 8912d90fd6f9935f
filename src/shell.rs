//! 대화형 메뉴
//!
//! 입출력은 [`BufRead`]/[`Write`]로 추상화되어 있으며, 레코드 저장과 주문 계산은 각각
//! [`RecordRepository`]와 [`crate::order`]에 위임한다. 화면 출력과 로깅은 이 모듈에서만 한다.

use crate::item::{Distributor, Textbook};
use crate::order::Order;
use crate::store::{RecordRepository, RecordStore};
use std::io;
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
enum ShellError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("end of input")]
    EndOfInput,

    #[error("invalid input: {0:?}")]
    InvalidInput(String),
}

struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    fn prompt(&mut self, label: &str) -> Result<String, ShellError> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ShellError::EndOfInput);
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_owned())
    }

    fn prompt_parsed<T: FromStr>(&mut self, label: &str) -> Result<T, ShellError> {
        let line = self.prompt(label)?;
        line.trim().parse().map_err(|_| ShellError::InvalidInput(line))
    }

    fn prompt_yes_no(&mut self, label: &str) -> Result<bool, ShellError> {
        match self.prompt_parsed::<u8>(label)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(ShellError::InvalidInput(other.to_string())),
        }
    }
}

/// 메뉴 루프
pub struct Shell<R, W, P> {
    console: Console<R, W>,
    repository: P,
    store: RecordStore,
}

impl<R, W, P> Shell<R, W, P>
where
    R: BufRead,
    W: Write,
    P: RecordRepository,
{
    pub fn new(input: R, output: W, repository: P) -> Self {
        Self {
            console: Console { input, output },
            repository,
            store: RecordStore::new(),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn into_store(self) -> RecordStore {
        self.store
    }

    /// `0`을 입력하거나 입력이 끝날 때까지 메뉴를 반복한다.
    /// 잘못된 입력은 현재 작업만 취소하고 메뉴로 돌아간다.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            match self.run_once() {
                Ok(true) => {}
                Ok(false) | Err(ShellError::EndOfInput) => return Ok(()),
                Err(ShellError::Io(e)) => return Err(e),
                Err(ShellError::InvalidInput(value)) => {
                    warn!(value = %value, "invalid input, action cancelled");
                    writeln!(self.console.output, "Invalid input.")?;
                }
            }
        }
    }

    /// 메뉴를 한 번 출력하고 선택한 작업을 실행한다. 종료를 선택하면 `false`.
    fn run_once(&mut self) -> Result<bool, ShellError> {
        self.print_menu()?;
        let choice = self.console.prompt("Enter your choice: ")?;

        match choice.trim() {
            "1" => self.add_textbook()?,
            "2" => self.add_distributor()?,
            "3" => self.place_order()?,
            "4" => self.save()?,
            "5" => self.load()?,
            "6" => self.list_records()?,
            "0" => {
                writeln!(self.console.output, "Exiting program. Goodbye!")?;
                return Ok(false);
            }
            _ => writeln!(self.console.output, "Invalid choice.")?,
        }
        Ok(true)
    }

    fn print_menu(&mut self) -> Result<(), ShellError> {
        let out = &mut self.console.output;
        writeln!(out)?;
        writeln!(out, "Menu:")?;
        writeln!(out, "1. Add Textbook")?;
        writeln!(out, "2. Add Distributor")?;
        writeln!(out, "3. Place Order")?;
        writeln!(out, "4. Save Data to File")?;
        writeln!(out, "5. Read Data from File")?;
        writeln!(out, "6. List Records")?;
        writeln!(out, "0. Exit")?;
        Ok(())
    }

    fn add_textbook(&mut self) -> Result<(), ShellError> {
        let console = &mut self.console;
        writeln!(console.output, "Enter textbook details:")?;

        let title = console.prompt("Title: ")?;
        let author = console.prompt("Author: ")?;
        let edition = console.prompt_parsed::<i32>("Edition: ")?;
        let isbn = console.prompt("ISBN: ")?;
        let publish_date = console.prompt("Publish Date: ")?;
        let circulation = console.prompt_parsed::<i32>("Circulation: ")?;
        let approved = console.prompt_yes_no("Approved (1 for Yes, 0 for No): ")?;
        let approval_date = if approved {
            console.prompt("Approval Date: ")?
        } else {
            String::new()
        };
        let price = console.prompt_parsed::<f64>("Price: ")?;

        let textbook = Textbook::builder()
            .title(title)
            .author(author)
            .edition(edition)
            .isbn(isbn)
            .publish_date(publish_date)
            .circulation(circulation)
            .approved(approved)
            .approval_date(approval_date)
            .price(price)
            .build();

        match textbook {
            Ok(textbook) => {
                info!(title = textbook.title(), isbn = textbook.isbn(), "textbook added");
                self.store.add_textbook(textbook);
                writeln!(self.console.output, "Textbook added successfully!")?;
            }
            Err(e) => {
                warn!(field = %e.field(), reason = e.reason(), "textbook rejected");
                writeln!(self.console.output, "Error: {}", e)?;
            }
        }
        Ok(())
    }

    fn add_distributor(&mut self) -> Result<(), ShellError> {
        let console = &mut self.console;
        writeln!(console.output, "Enter distributor details:")?;

        let name = console.prompt("Name: ")?;
        let address = console.prompt("Address: ")?;
        let phone = console.prompt("Phone: ")?;

        let distributor = Distributor::builder()
            .name(name)
            .address(address)
            .phone(phone)
            .build();

        match distributor {
            Ok(distributor) => {
                info!(name = distributor.name(), "distributor added");
                self.store.add_distributor(distributor);
                writeln!(self.console.output, "Distributor added successfully!")?;
            }
            Err(e) => {
                warn!(field = %e.field(), reason = e.reason(), "distributor rejected");
                writeln!(self.console.output, "Error: {}", e)?;
            }
        }
        Ok(())
    }

    fn place_order(&mut self) -> Result<(), ShellError> {
        let store = &self.store;
        let console = &mut self.console;

        if let Err(e) = Order::check_preconditions(store) {
            warn!(error = %e, "order not started");
            writeln!(console.output, "Add distributors and textbooks before placing an order.")?;
            return Ok(());
        }

        writeln!(console.output, "Select a distributor:")?;
        for (number, distributor) in store.list_distributors() {
            writeln!(console.output, "{}. {}", number, distributor.name())?;
        }
        let distributor_number = console.prompt_parsed::<usize>("")?;

        let mut order = match Order::start(store, distributor_number) {
            Ok(order) => order,
            Err(e) => {
                warn!(error = %e, "order aborted");
                writeln!(console.output, "Invalid selection.")?;
                return Ok(());
            }
        };

        loop {
            writeln!(console.output, "Select a textbook to order (0 to finish):")?;
            for (number, textbook) in store.list_textbooks() {
                writeln!(console.output, "{}. {} - {}", number, textbook.title(), textbook.price())?;
            }

            let textbook_number = console.prompt_parsed::<usize>("")?;
            if textbook_number == 0 {
                break;
            }
            if order.add(textbook_number).is_err() {
                writeln!(console.output, "Invalid selection.")?;
            }
        }

        let receipt = order.finish();
        info!(
            distributor = receipt.distributor().name(),
            items = receipt.lines().len(),
            rejected = receipt.rejected().len(),
            total = receipt.total(),
            "order placed"
        );
        writeln!(console.output, "Total order price: {}", receipt.total())?;
        Ok(())
    }

    fn save(&mut self) -> Result<(), ShellError> {
        match self.repository.save(&self.store) {
            Ok(()) => {
                info!(
                    textbooks = self.store.textbooks().len(),
                    distributors = self.store.distributors().len(),
                    "records saved"
                );
                writeln!(self.console.output, "Data saved to file successfully!")?;
            }
            Err(e) => {
                warn!(error = %e, "save failed");
                writeln!(self.console.output, "Error: {}", e)?;
            }
        }
        Ok(())
    }

    fn load(&mut self) -> Result<(), ShellError> {
        match self.repository.load(&mut self.store) {
            Ok(()) => {
                info!(
                    textbooks = self.store.textbooks().len(),
                    distributors = self.store.distributors().len(),
                    "records loaded"
                );
                writeln!(self.console.output, "Data read from file successfully!")?;
            }
            Err(e) => {
                warn!(error = %e, "load failed");
                writeln!(self.console.output, "Error: {}", e)?;
            }
        }
        Ok(())
    }

    fn list_records(&mut self) -> Result<(), ShellError> {
        let out = &mut self.console.output;

        writeln!(out, "Textbooks:")?;
        for (number, textbook) in self.store.list_textbooks() {
            writeln!(out, "{}.", number)?;
            write!(out, "{}", textbook)?;
        }

        writeln!(out, "Distributors:")?;
        for (number, distributor) in self.store.list_distributors() {
            writeln!(out, "{}.", number)?;
            write!(out, "{}", distributor)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use crate::codec::CodecError;
    use std::cell::RefCell;
    use std::io::Cursor;
    use std::rc::Rc;

    /// 파일 대신 문자열에 기록하는 저장소
    #[derive(Default, Clone)]
    struct MemoryRepository {
        saved: Rc<RefCell<Option<String>>>,
    }

    impl RecordRepository for MemoryRepository {
        fn save(&self, store: &RecordStore) -> Result<(), CodecError> {
            *self.saved.borrow_mut() = Some(codec::encode(store));
            Ok(())
        }

        fn load(&self, store: &mut RecordStore) -> Result<(), CodecError> {
            let saved = self.saved.borrow();
            let text = saved.as_deref().ok_or_else(|| {
                CodecError::Io(io::Error::new(io::ErrorKind::NotFound, "nothing saved"))
            })?;
            let (textbooks, distributors) = codec::decode(text)?.into_parts();
            store.replace_all(textbooks, distributors);
            Ok(())
        }
    }

    const ADD_TEXTBOOK: &str = "1\nAbstract Algebra\nDummit\n3\n978-0471433347\n14.07.2003\n1200\n1\n01.09.2004\n89.5\n";
    const ADD_DISTRIBUTOR: &str = "2\nProsveta\nSofia\n0888123456\n";

    fn run(input: &str, repository: MemoryRepository) -> (RecordStore, String) {
        let mut output = Vec::new();
        let store = {
            let mut shell = Shell::new(Cursor::new(input.to_owned()), &mut output, repository);
            shell.run().unwrap();
            shell.into_store()
        };
        (store, String::from_utf8(output).unwrap())
    }

    #[test]
    fn adds_records_and_exits() {
        let input = format!("{}{}0\n", ADD_TEXTBOOK, ADD_DISTRIBUTOR);
        let (store, output) = run(&input, MemoryRepository::default());

        assert_eq!(store.textbooks().len(), 1);
        assert_eq!(store.textbooks()[0].approval_date(), "01.09.2004");
        assert_eq!(store.distributors().len(), 1);
        assert!(output.contains("Textbook added successfully!"));
        assert!(output.contains("Distributor added successfully!"));
        assert!(output.ends_with("Exiting program. Goodbye!\n"));
    }

    #[test]
    fn unapproved_textbook_skips_approval_date() {
        let input = "1\nCalculus\nSpivak\n4\nisbn\n01.01.2008\n300\n0\n60\n0\n";
        let (store, output) = run(input, MemoryRepository::default());

        assert_eq!(store.textbooks().len(), 1);
        assert!(!output.contains("Approval Date: "));
    }

    #[test]
    fn invalid_textbook_is_not_added() {
        let input = "1\n\nDummit\n3\nisbn\n14.07.2003\n1200\n0\n89.5\n0\n";
        let (store, output) = run(input, MemoryRepository::default());

        assert!(store.textbooks().is_empty());
        assert!(output.contains("Error: Title cannot be empty."));
    }

    #[test]
    fn non_numeric_input_cancels_action() {
        let input = "1\nTitle\nAuthor\nthird\n0\n";
        let (store, output) = run(input, MemoryRepository::default());

        assert!(store.textbooks().is_empty());
        assert!(output.contains("Invalid input."));
        assert!(output.ends_with("Exiting program. Goodbye!\n"));
    }

    #[test]
    fn order_requires_records() {
        let (_, output) = run("3\n0\n", MemoryRepository::default());
        assert!(output.contains("Add distributors and textbooks before placing an order."));
    }

    #[test]
    fn order_sums_selected_prices() {
        let input = format!("{}{}3\n1\n1\n5\n1\n0\n0\n", ADD_TEXTBOOK, ADD_DISTRIBUTOR);
        let (_, output) = run(&input, MemoryRepository::default());

        assert!(output.contains("1. Prosveta\n"));
        assert!(output.contains("1. Abstract Algebra - 89.5\n"));
        assert!(output.contains("Invalid selection.\n"));
        assert!(output.contains("Total order price: 179\n"));
    }

    #[test]
    fn order_with_unknown_distributor_is_aborted() {
        let input = format!("{}{}3\n7\n0\n", ADD_TEXTBOOK, ADD_DISTRIBUTOR);
        let (_, output) = run(&input, MemoryRepository::default());

        assert!(output.contains("Invalid selection.\n"));
        assert!(!output.contains("Total order price"));
    }

    #[test]
    fn save_then_load_restores_records() {
        let repository = MemoryRepository::default();
        let input = format!("{}{}4\n0\n", ADD_TEXTBOOK, ADD_DISTRIBUTOR);
        let (saved_store, output) = run(&input, repository.clone());
        assert!(output.contains("Data saved to file successfully!"));

        let (loaded_store, output) = run("5\n6\n0\n", repository);
        assert!(output.contains("Data read from file successfully!"));
        assert!(output.contains("1.\nTitle: Abstract Algebra\n"));
        assert_eq!(loaded_store, saved_store);
    }

    #[test]
    fn failed_load_keeps_current_records() {
        let input = format!("{}5\n0\n", ADD_DISTRIBUTOR);
        let (store, output) = run(&input, MemoryRepository::default());

        assert!(output.contains("Error: file access failed: nothing saved"));
        assert_eq!(store.distributors().len(), 1);
    }

    #[test]
    fn unknown_choice_returns_to_menu() {
        let (_, output) = run("9\n0\n", MemoryRepository::default());

        assert!(output.contains("Invalid choice.\n"));
        assert!(output.ends_with("Exiting program. Goodbye!\n"));
    }

    #[test]
    fn end_of_input_exits_quietly() {
        let (store, output) = run("2\nProsveta\n", MemoryRepository::default());

        assert!(store.distributors().is_empty());
        assert!(!output.contains("Goodbye"));
    }
}
