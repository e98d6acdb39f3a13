mod mock;

use devino::board::PinKind;
use devino::config::{Config, Gating, LineEnding, SetGate};
use devino::interpreter::{Devino, Outcome};
use devino::protocol::{Command, Response, Segment, responses};
use devino::serial::error::Error;
use mock::{Call, MockBoard, MockSerial};

fn interpreter(input: &[u8], config: Config) -> Devino<MockSerial, MockBoard> {
    Devino::new(MockSerial::new(input), MockBoard::new(), config)
}

fn gated(gating: Gating, set_gate: SetGate) -> Config {
    let mut config = Config::default();
    config.set_gating(gating);
    config.set_set_gate(set_gate);
    config
}

/// Poll until the port is drained, collecting every outcome
fn run_all(devino: &mut Devino<MockSerial, MockBoard>) -> Vec<Outcome> {
    let mut outcomes = Vec::new();
    while let Some(outcome) = devino.process_commands().unwrap() {
        outcomes.push(outcome);
    }
    outcomes
}

#[test]
fn test_digital_write_then_read_back() {
    let mut devino = interpreter(b"<set d 3 1><get d 3>", Config::default());

    let outcomes = run_all(&mut devino);
    assert_eq!(
        outcomes,
        vec![
            Outcome::Wrote(Response::write(PinKind::Digital, 3, 1)),
            Outcome::Read(Response::read(PinKind::Digital, 3, 1)),
        ]
    );
    assert_eq!(devino.serial().output(), "<WD3 1><RD3 1>");
}

#[test]
fn test_analog_read_emits_one_frame() {
    let mut devino = interpreter(b"<get a 0>", Config::default());
    devino.board_mut().adc[0] = 512;

    run_all(&mut devino);
    assert_eq!(devino.serial().output(), "<RA0 512>");
    assert_eq!(devino.board().calls, vec![Call::AnalogRead(0)]);
}

#[test]
fn test_analog_write_acknowledged() {
    let mut devino = interpreter(b"<set a 5 200>", Config::default());

    run_all(&mut devino);
    assert_eq!(devino.serial().output(), "<WA5 200>");
    assert_eq!(devino.board().calls, vec![Call::AnalogWrite(5, 200)]);
    assert_eq!(devino.board().duty[5], 200);
}

#[test]
fn test_transmit_disabled_still_writes() {
    let mut config = Config::default();
    config.set_transmit(false);
    let mut devino = interpreter(b"<set a 5 200><get a 5>", config);

    let outcomes = run_all(&mut devino);
    assert_eq!(outcomes.len(), 2);
    assert!(!devino.transmit());
    assert_eq!(devino.serial().output(), "");
    assert_eq!(
        devino.board().calls,
        vec![Call::AnalogWrite(5, 200), Call::AnalogRead(5)]
    );
}

#[test]
fn test_gated_write_waits_for_read() {
    let mut devino = interpreter(
        b"<set d 2 1>",
        gated(Gating::InitiallyDisabled, SetGate::Unchanged),
    );

    assert_eq!(
        devino.process_commands(),
        Ok(Some(Outcome::Gated {
            kind: PinKind::Digital,
            pin: 2
        }))
    );
    assert!(devino.board().writes().is_empty());
    assert_eq!(devino.serial().output(), "");

    devino.serial_mut().receive(b"<get d 2>");
    run_all(&mut devino);
    assert_eq!(devino.serial_mut().take_output(), "<RD2 0>");
    assert!(devino.dispatcher().gate().is_enabled(2));

    devino.serial_mut().receive(b"<set d 2 1>");
    run_all(&mut devino);
    assert_eq!(devino.serial().output(), "<WD2 1>");
    assert_eq!(devino.board().writes(), vec![Call::DigitalWrite(2, 1)]);
}

#[test]
fn test_gate_is_per_pin() {
    let mut devino = interpreter(
        b"<get d 2><set d 3 1><set d 2 1>",
        gated(Gating::InitiallyDisabled, SetGate::Unchanged),
    );

    let outcomes = run_all(&mut devino);
    assert_eq!(
        outcomes[1],
        Outcome::Gated {
            kind: PinKind::Digital,
            pin: 3
        }
    );
    assert_eq!(devino.board().writes(), vec![Call::DigitalWrite(2, 1)]);
}

#[test]
fn test_set_disables_gate() {
    let mut devino = interpreter(
        b"<set d 4 1><set d 4 0><get d 4><set d 4 0>",
        gated(Gating::InitiallyEnabled, SetGate::Disable),
    );

    let outcomes = run_all(&mut devino);
    assert!(matches!(outcomes[0], Outcome::Wrote(_)));
    assert!(matches!(outcomes[1], Outcome::Gated { pin: 4, .. }));
    assert!(matches!(outcomes[2], Outcome::Read(_)));
    assert!(matches!(outcomes[3], Outcome::Wrote(_)));
    assert_eq!(
        devino.board().writes(),
        vec![Call::DigitalWrite(4, 1), Call::DigitalWrite(4, 0)]
    );
    assert!(!devino.dispatcher().gate().is_enabled(4));
}

#[test]
fn test_set_enables_gate_for_next_write() {
    let mut devino = interpreter(
        b"<set a 9 10><set a 9 20>",
        gated(Gating::InitiallyDisabled, SetGate::Enable),
    );

    let outcomes = run_all(&mut devino);
    assert!(matches!(outcomes[0], Outcome::Gated { pin: 9, .. }));
    assert_eq!(
        outcomes[1],
        Outcome::Wrote(Response::write(PinKind::Analog, 9, 20))
    );
    assert_eq!(devino.serial().output(), "<WA9 20>");
}

#[test]
fn test_set_gate_has_no_effect_without_gating() {
    let mut devino = interpreter(
        b"<set d 4 1><set d 4 0>",
        gated(Gating::Off, SetGate::Disable),
    );

    run_all(&mut devino);
    assert_eq!(
        devino.board().writes(),
        vec![Call::DigitalWrite(4, 1), Call::DigitalWrite(4, 0)]
    );
}

#[test]
fn test_unknown_command_is_silent() {
    let mut devino = interpreter(b"<foo bar><get d 1>", Config::default());

    assert_eq!(devino.process_commands(), Ok(Some(Outcome::Ignored)));
    assert!(devino.board().calls.is_empty());
    assert_eq!(devino.serial().output(), "");
    assert!(!devino.scanner().is_armed());

    assert!(matches!(
        devino.process_commands(),
        Ok(Some(Outcome::Read(_)))
    ));
}

#[test]
fn test_missing_argument_is_ignored() {
    let mut devino = interpreter(b"<set a 5><get a><set>", Config::default());

    let outcomes = run_all(&mut devino);
    assert_eq!(outcomes, vec![Outcome::Ignored; 3]);
    assert!(devino.board().calls.is_empty());
}

#[test]
fn test_out_of_range_is_noop() {
    let mut devino = interpreter(
        b"<set d 14 1><set a 3 256><set a 3 -1><get a -1><get d 99>",
        Config::default(),
    );

    let outcomes = run_all(&mut devino);
    assert_eq!(outcomes, vec![Outcome::OutOfRange; 5]);
    assert!(devino.board().calls.is_empty());
    assert_eq!(devino.serial().output(), "");
}

#[test]
fn test_out_of_range_does_not_touch_gate() {
    let mut devino = interpreter(
        b"<set d 2 300>",
        gated(Gating::InitiallyEnabled, SetGate::Disable),
    );

    run_all(&mut devino);
    assert!(devino.dispatcher().gate().is_enabled(2));
}

#[test]
fn test_unterminated_frame_never_dispatches() {
    let mut devino = interpreter(b"<set d 3", Config::default());

    assert_eq!(devino.process_commands(), Ok(None));
    assert!(devino.scanner().is_armed());
    assert!(devino.board().calls.is_empty());

    devino.serial_mut().receive(b" 1>");
    assert_eq!(
        devino.process_commands(),
        Ok(Some(Outcome::Wrote(Response::write(PinKind::Digital, 3, 1))))
    );
}

#[test]
fn test_unterminated_frame_does_not_corrupt_next() {
    let mut devino = interpreter(b"<set d 3", Config::default());
    assert_eq!(devino.process_commands(), Ok(None));

    devino.serial_mut().receive(b"><get d 4>");
    let outcomes = run_all(&mut devino);
    assert_eq!(
        outcomes,
        vec![
            Outcome::Ignored,
            Outcome::Read(Response::read(PinKind::Digital, 4, 0)),
        ]
    );
    assert_eq!(devino.board().calls, vec![Call::DigitalRead(4)]);
}

#[test]
fn test_one_frame_per_call() {
    let mut devino = interpreter(b"<get d 1><get d 2>", Config::default());

    assert!(devino.process_commands().unwrap().is_some());
    assert_eq!(devino.board().calls, vec![Call::DigitalRead(1)]);

    assert!(devino.process_commands().unwrap().is_some());
    assert_eq!(
        devino.board().calls,
        vec![Call::DigitalRead(1), Call::DigitalRead(2)]
    );

    assert_eq!(devino.process_commands(), Ok(None));
}

#[test]
fn test_noise_between_frames() {
    let mut devino = interpreter(b"\r\nhello>> <get a 1>garbage", Config::default());
    devino.board_mut().adc[1] = 7;

    let outcomes = run_all(&mut devino);
    assert_eq!(outcomes.len(), 1);
    assert_eq!(devino.serial().output(), "<RA1 7>");
}

#[test]
fn test_non_utf8_frame_is_ignored() {
    let mut devino = interpreter(b"<\xff\xfe>", Config::default());
    assert_eq!(devino.process_commands(), Ok(Some(Outcome::Ignored)));
}

#[test]
fn test_crlf_line_ending() {
    let mut config = Config::default();
    config.set_line_ending(LineEnding::CrLf);
    let mut devino = interpreter(b"<get a 0><set d 13 1>", config);

    run_all(&mut devino);
    assert_eq!(devino.serial().output(), "<RA0 0>\r\n<WD13 1>\r\n");
}

#[test]
fn test_write_failure_is_reported() {
    let mut devino = interpreter(b"<set d 5 1>", Config::default());
    devino.serial_mut().closed = true;

    assert_eq!(devino.process_commands(), Err(Error::WriteError));
    // The hardware write happened before the response failed.
    assert_eq!(devino.board().writes(), vec![Call::DigitalWrite(5, 1)]);
}

#[test]
fn test_direct_pin_api() {
    let mut devino = interpreter(
        b"",
        gated(Gating::InitiallyDisabled, SetGate::Unchanged),
    );
    devino.board_mut().adc[3] = 300;

    assert_eq!(
        devino.write_digital(6, 1),
        Ok(Outcome::Gated {
            kind: PinKind::Digital,
            pin: 6
        })
    );
    assert_eq!(devino.read_analog(3), Ok(Some(300)));
    assert_eq!(devino.read_digital(6), Ok(Some(0)));
    assert_eq!(devino.read_digital(20), Ok(None));
    assert!(matches!(
        devino.write_analog(6, 128),
        Ok(Outcome::Gated { pin: 6, .. })
    ));

    devino.serial_mut().receive(b"<get d 6>");
    run_all(&mut devino);
    assert!(matches!(devino.write_digital(6, 1), Ok(Outcome::Wrote(_))));
    assert!(matches!(devino.write_analog(6, 128), Ok(Outcome::Wrote(_))));

    assert_eq!(
        devino.serial().output(),
        "<RA3 300><RD6 0><RD6 0><WD6 1><WA6 128>"
    );
}

#[test]
fn test_direct_read_leaves_gate_closed() {
    let mut devino = interpreter(
        b"",
        gated(Gating::InitiallyDisabled, SetGate::Unchanged),
    );

    assert_eq!(devino.read_digital(6), Ok(Some(0)));
    assert_eq!(devino.read_analog(6), Ok(Some(0)));
    assert!(!devino.dispatcher().gate().is_enabled(6));

    devino.serial_mut().receive(b"<set d 6 1>");
    assert_eq!(
        devino.process_commands(),
        Ok(Some(Outcome::Gated {
            kind: PinKind::Digital,
            pin: 6
        }))
    );
    assert!(devino.board().writes().is_empty());
}

#[test]
fn test_config_from_json() {
    let config = Config::from_json(r#"{"transmit": false, "gating": "disabled"}"#).unwrap();
    let mut devino = interpreter(b"<get d 8><set d 8 1>", config);

    run_all(&mut devino);
    assert_eq!(devino.serial().output(), "");
    assert_eq!(devino.board().writes(), vec![Call::DigitalWrite(8, 1)]);
}

#[test]
fn test_host_round_trip() {
    let commands = [
        Command::set(PinKind::Digital, 7, 1),
        Command::get(PinKind::Digital, 7),
        Command::set(PinKind::Analog, 10, 64),
    ];

    let mut wire = String::new();
    for command in &commands {
        wire.push_str(command.encode().unwrap().as_str());
    }

    let mut config = Config::default();
    config.set_line_ending(LineEnding::CrLf);
    let mut devino = interpreter(wire.as_bytes(), config);
    run_all(&mut devino);

    let decoded: Vec<Response> = responses(devino.serial().output())
        .filter_map(|segment| match segment {
            Segment::Response(response) => Some(response),
            _ => None,
        })
        .collect();

    assert_eq!(
        decoded,
        vec![
            Response::write(PinKind::Digital, 7, 1),
            Response::read(PinKind::Digital, 7, 1),
            Response::write(PinKind::Analog, 10, 64),
        ]
    );
}

#[test]
fn test_release_returns_collaborators() {
    let mut devino = interpreter(b"<set d 1 1>", Config::default());
    run_all(&mut devino);

    let (serial, board) = devino.release();
    assert_eq!(serial.output(), "<WD1 1>");
    assert_eq!(board.levels[1], 1);
}
