use contactmgr_core::{
    ContactBuilder, ContactRepository, DatabaseConfig, SchemaPolicy, SessionFactory,
    SqliteContactRepository,
};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::sync::Once;

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        CAPTURED.with(|lines| {
            lines
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

fn install_logger() {
    INSTALL.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
}

fn take_captured() -> Vec<(Level, String)> {
    CAPTURED.with(|lines| std::mem::take(&mut *lines.borrow_mut()))
}

fn sql_lines(captured: &[(Level, String)]) -> Vec<&(Level, String)> {
    captured
        .iter()
        .filter(|(_, message)| message.starts_with("event=sql "))
        .collect()
}

fn save_and_fetch(show_sql: bool) -> Vec<(Level, String)> {
    install_logger();
    let config = DatabaseConfig {
        show_sql,
        ..DatabaseConfig::in_memory(SchemaPolicy::Create)
    };
    let factory = SessionFactory::build(&config).unwrap();
    assert_eq!(factory.show_sql(), show_sql);
    let repo = SqliteContactRepository::new(&factory);
    take_captured();

    let mut contact = ContactBuilder::new("Moo", "Mee")
        .with_email("moo@something.com")
        .build();
    repo.save(&mut contact).unwrap();
    assert_eq!(repo.fetch_all().unwrap(), vec![contact]);

    take_captured()
}

#[test]
fn show_sql_echoes_insert_and_select_at_info() {
    let captured = save_and_fetch(true);
    let lines = sql_lines(&captured);

    assert_eq!(lines.len(), 2, "captured: {captured:?}");
    assert!(lines.iter().all(|(level, _)| *level == Level::Info));
    assert!(lines[0].1.contains("INSERT INTO Contact"));
    assert!(lines[1].1.contains("SELECT id, firstName, lastName, email, phone FROM Contact"));
}

#[test]
fn sql_is_not_echoed_when_show_sql_is_off() {
    let captured = save_and_fetch(false);

    assert!(sql_lines(&captured).is_empty(), "captured: {captured:?}");
    assert!(captured
        .iter()
        .any(|(_, message)| message.starts_with("event=contact_save ")));
}
