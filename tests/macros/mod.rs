use errno_rail::{
    call_site, check, contract, function_name, log, log_erno, log_error, log_write, raise, ErrorCode,
};
use std::fs;
use std::thread;

const BAD_INPUT: ErrorCode = ErrorCode::new(0x0300_0001);

fn validate(n: i32) -> Result<i32, ErrorCode> {
    check!(n >= 0, BAD_INPUT);
    if n > 100 {
        raise!(0x0300_0002u32);
    }
    Ok(n)
}

#[test]
fn function_name_looks_through_closures() {
    assert_eq!(function_name!(), "function_name_looks_through_closures");

    let nested = || (|| function_name!())();
    assert_eq!(nested(), "function_name_looks_through_closures");
}

#[test]
fn call_site_records_file_and_line() {
    let line = line!() + 1;
    let site = call_site!();

    assert_eq!(site.function(), "call_site_records_file_and_line");
    assert_eq!(site.file(), file!());
    assert_eq!(site.line(), line);
    assert_eq!(
        site.to_string(),
        format!("call_site_records_file_and_line() [{}:{}]", file!(), line)
    );
}

#[test]
fn raise_and_check_return_early() {
    assert_eq!(validate(5), Ok(5));
    assert_eq!(validate(-1), Err(BAD_INPUT));
    assert_eq!(validate(101), Err(ErrorCode::new(0x0300_0002)));
}

#[test]
fn log_macros_write_to_the_thread_channel() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("macros.log");

    thread::spawn({
        let path = path.clone();
        move || {
            log::open(&path, true);
            log_error!("Exception {:#x} caught in {}", 0xDEAD_BEEFu32, function_name!());
            log_write!('I', "plain");
            log::close();
        }
    })
    .join()
    .unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert!(lines[0].starts_with("[E] "));
    assert!(lines[0].ends_with("]: Exception 0xdeadbeef caught in log_macros_write_to_the_thread_channel"));
    assert!(lines[1].starts_with("[I] "));
    assert!(lines[1].ends_with("]: plain"));
}

#[test]
fn log_erno_only_fires_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("erno.log");

    thread::spawn({
        let path = path.clone();
        move || {
            log::open(&path, true);

            let ok = contract::attempt(|| validate(1))
                .handle(|code| {
                    log_erno!();
                    code
                })
                .run();
            assert!(ok.is_success());

            let failed = contract::attempt(|| validate(-3))
                .handle(|code| {
                    log_erno!();
                    code
                })
                .run();
            assert_eq!(failed.code(), BAD_INPUT);

            log::close();
        }
    })
    .join()
    .unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("error 0x03000001 raised in"));
}
