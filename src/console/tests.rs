use std::io::Cursor;
use std::sync::mpsc;

use super::{ConsoleDriver, ConsoleError, Tokens};
use crate::calc::OperandPair;
use crate::window::{Command, WindowHandle};

fn driver(input: &str) -> ConsoleDriver<Cursor<Vec<u8>>, Vec<u8>> {
    ConsoleDriver::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

fn output(driver: ConsoleDriver<Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8(driver.into_output()).expect("utf-8 output")
}

#[test]
fn tokens_span_lines() {
    let mut tokens = Tokens::new(Cursor::new(b"3 4\n\n  y\n".to_vec()));
    assert_eq!(tokens.next_token().ok(), Some("3".to_string()));
    assert_eq!(tokens.next_token().ok(), Some("4".to_string()));
    assert_eq!(tokens.next_token().ok(), Some("y".to_string()));
    match tokens.next_token() {
        Err(ConsoleError::EndOfInput) => (),
        other => panic!("expected end of input, got {:?}", other),
    }
}

#[test]
fn out_of_range_first_number_reprompts() {
    let mut d = driver("-1\n16\n7\n2\n");
    let pair = d.prompt_operand_pair().expect("valid pair");
    assert_eq!(pair, OperandPair { first: 7.0, second: 2.0 });

    let out = output(d);
    assert_eq!(out.matches("Enter the first number (0-15): ").count(), 3);
    assert_eq!(out.matches("Number out of range. Try again.").count(), 2);
    assert_eq!(out.matches("Enter the second number (0-15): ").count(), 1);
    assert!(out.ends_with("Numbers updated: 7.0 and 2.0\n"));
}

#[test]
fn second_number_validated_independently() {
    let mut d = driver("15 100 0\n");
    let pair = d.prompt_operand_pair().expect("valid pair");
    assert_eq!(pair, OperandPair { first: 15.0, second: 0.0 });

    let out = output(d);
    assert_eq!(out.matches("Enter the first number").count(), 1);
    assert_eq!(out.matches("Enter the second number").count(), 2);
}

#[test]
fn non_numeric_input_reprompts() {
    let mut d = driver("abc NaN 2.5\n3\n");
    let pair = d.prompt_operand_pair().expect("valid pair");
    assert_eq!(pair, OperandPair { first: 2.5, second: 3.0 });

    let out = output(d);
    assert_eq!(out.matches("Not a number. Try again.").count(), 1);
    assert_eq!(out.matches("Number out of range. Try again.").count(), 1);
}

#[test]
fn invalid_utf8_is_not_a_number() {
    let mut d = ConsoleDriver::new(Cursor::new(b"\xff\xfe\n3\n4\n".to_vec()), Vec::new());
    let pair = d.prompt_operand_pair().expect("valid pair");
    assert_eq!(pair, OperandPair { first: 3.0, second: 4.0 });

    let out = output(d);
    assert_eq!(out.matches("Not a number. Try again.").count(), 1);
    assert_eq!(out.matches("Enter the first number (0-15): ").count(), 2);
}

#[test]
fn main_loop_disposes_after_invalid_utf8_answer() {
    let (tx, rx) = mpsc::channel();
    let handle = WindowHandle::new(tx);

    let mut d = ConsoleDriver::new(Cursor::new(b"\xff\n".to_vec()), Vec::new());
    d.main_loop(&handle).expect("loop finishes");

    let commands: Vec<Command> = rx.try_iter().collect();
    assert_eq!(commands, vec![Command::Dispose]);
    assert!(output(d).ends_with("Program finished.\n"));
}

#[test]
fn closed_input_is_reported() {
    let mut d = driver("4\n");
    match d.prompt_operand_pair() {
        Err(ConsoleError::EndOfInput) => (),
        other => panic!("expected end of input, got {:?}", other),
    }
}

#[test]
fn continue_answers() {
    let mut d = driver("y Yes n no x");
    assert!(d.ask_continue().expect("answer"));
    assert!(d.ask_continue().expect("answer"));
    assert!(!d.ask_continue().expect("answer"));
    assert!(!d.ask_continue().expect("answer"));
    assert!(!d.ask_continue().expect("answer"));
}

#[test]
fn main_loop_forwards_pairs_then_disposes() {
    let (tx, rx) = mpsc::channel();
    let handle = WindowHandle::new(tx);

    let mut d = driver("y\n5 0\nY\n1 2\nn\n");
    d.main_loop(&handle).expect("loop finishes");

    let commands: Vec<Command> = rx.try_iter().collect();
    assert_eq!(
        commands,
        vec![
            Command::SetOperands(OperandPair { first: 5.0, second: 0.0 }),
            Command::SetOperands(OperandPair { first: 1.0, second: 2.0 }),
            Command::Dispose,
        ]
    );
    assert!(output(d).ends_with("Program finished.\n"));
}

#[test]
fn main_loop_treats_closed_input_as_decline() {
    let (tx, rx) = mpsc::channel();
    let handle = WindowHandle::new(tx);

    let mut d = driver("y\n3\n");
    d.main_loop(&handle).expect("loop finishes");

    let commands: Vec<Command> = rx.try_iter().collect();
    assert_eq!(commands, vec![Command::Dispose]);
    assert!(output(d).ends_with("Program finished.\n"));
}

#[test]
fn main_loop_stops_when_window_is_gone() {
    let (tx, rx) = mpsc::channel();
    let handle = WindowHandle::new(tx);
    drop(rx);

    let mut d = driver("y\n1 1\ny\n2 2\n");
    match d.main_loop(&handle) {
        Err(ConsoleError::WindowClosed) => (),
        other => panic!("expected closed window, got {:?}", other),
    }
}
