use errno_rail::traits::{IntoErrorCode, RaiseExt};
use errno_rail::{contract, ErrorCode};

const PARSE: ErrorCode = ErrorCode::new(0x0400_0001);
const MISSING: ErrorCode = ErrorCode::new(0x0400_0002);

#[derive(Clone, Copy)]
enum Net {
    Refused = 0x0700_0001,
}

impl IntoErrorCode for Net {
    fn into_error_code(self) -> ErrorCode {
        ErrorCode::new(self as u32)
    }
}

#[test]
fn raise_replaces_foreign_errors() {
    assert_eq!("7".parse::<u8>().raise(PARSE), Ok(7));
    assert_eq!("x".parse::<u8>().raise(PARSE), Err(PARSE));
    assert_eq!("x".parse::<u8>().raise(0x0400_0009u32), Err(ErrorCode::new(0x0400_0009)));
    assert_eq!(Err::<(), _>("refused").raise(Net::Refused), Err(ErrorCode::new(0x0700_0001)));
}

#[test]
fn raise_turns_missing_values_into_codes() {
    assert_eq!(Some(3).raise(MISSING), Ok(3));
    assert_eq!(None::<u8>.raise(MISSING), Err(MISSING));
}

#[test]
fn raise_with_is_lazy() {
    let mut calls = 0;
    let ok = Some(1).raise_with(|| {
        calls += 1;
        MISSING
    });
    assert_eq!(ok, Ok(1));
    assert_eq!(calls, 0);

    assert_eq!(Err::<(), ()>(()).raise_with(|| PARSE), Err(PARSE));
}

#[test]
fn raise_feeds_the_abort_path() {
    let done = contract::attempt(|| {
        let n = "oops".parse::<u32>().raise(PARSE)?;
        Ok(n)
    })
    .run();

    assert_eq!(done.code(), PARSE);
    assert!(done.value().is_none());
}

#[test]
fn results_collapse_into_codes() {
    assert_eq!(Ok::<_, ErrorCode>(5).into_error_code(), ErrorCode::NONE);
    assert_eq!(Err::<u8, _>(MISSING).into_error_code(), MISSING);
    assert_eq!(MISSING.into_error_code(), MISSING);
}

#[test]
fn error_code_conversions_and_display() {
    let code = ErrorCode::from(0x0001_0001u32);
    assert_eq!(code, ErrorCode::MPOOL);
    assert_eq!(u32::from(code), 0x0001_0001);
    assert_eq!(code.to_string(), "0x00010001");
    assert_eq!(ErrorCode::NONE.to_string(), "0x00000000");
    assert_eq!(ErrorCode::default(), ErrorCode::NONE);

    assert_eq!(ErrorCode::NONE.into_result(), Ok(()));
    assert_eq!(PARSE.into_result(), Err(PARSE));
}
