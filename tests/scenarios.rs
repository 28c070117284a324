use simon_firmware::board::{Button, Frame};
use simon_firmware::config::{GameConfig, MAX_HIGHSCORES};
use simon_firmware::console::{parse_line, ConsoleCommand, RUN_LIMIT_TICKS};
use simon_firmware::highscore::HighScoreTable;
use simon_firmware::input::Input;
use simon_firmware::lfsr::Lfsr;
use simon_firmware::testing::RecordingBoard;
use simon_firmware::{Phase, Simon};

fn new_game(seed: u32) -> (Simon, RecordingBoard) {
    let mut board = RecordingBoard::new();
    let mut game = Simon::new(GameConfig::DEFAULT);
    game.reset(&mut board);
    game.handle(Input::Seed(seed), &mut board);
    game.handle(Input::Start, &mut board);
    (game, board)
}

fn wait(game: &mut Simon, board: &mut RecordingBoard) {
    game.run(board, RUN_LIMIT_TICKS);
}

fn replay(game: &mut Simon, board: &mut RecordingBoard) {
    let sequence: Vec<Button> = game.sequence().to_vec();
    for button in sequence {
        game.handle(Input::Press(button), board);
    }
}

fn other(button: Button) -> Button {
    Button::ALL[(button.index() + 2) % 4]
}

/// Play rounds correctly until `level` steps are waiting for input.
fn reach_level(game: &mut Simon, board: &mut RecordingBoard, level: usize) {
    wait(game, board);
    while game.level() < level {
        assert_eq!(game.phase(), Phase::AwaitInput);
        replay(game, board);
        wait(game, board);
    }
    assert_eq!(game.phase(), Phase::AwaitInput);
    assert_eq!(game.level(), level);
}

#[test]
fn seed_one_grows_the_same_sequence() {
    let (mut game, mut board) = new_game(0x1);
    assert_eq!(game.level(), 1);
    let first = game.sequence()[0];

    wait(&mut game, &mut board);
    game.handle(Input::Press(first), &mut board);
    assert_eq!(game.phase(), Phase::RoundComplete);

    while game.phase() == Phase::RoundComplete {
        game.tick(&mut board);
    }
    assert_eq!(game.phase(), Phase::Playback);
    assert_eq!(game.level(), 2);
    assert_eq!(game.sequence()[0], first);
}

#[test]
fn sequence_matches_generator_stream() {
    let (mut game, mut board) = new_game(0x1);
    reach_level(&mut game, &mut board, 6);

    let mut lfsr = Lfsr::new(0x1);
    let expected: Vec<Button> = (0..6).map(|_| lfsr.next_button()).collect();
    assert_eq!(game.sequence(), expected.as_slice());
}

#[test]
fn same_seed_same_game() {
    let (mut a, mut board_a) = new_game(0xC0FFEE);
    let (mut b, mut board_b) = new_game(0xC0FFEE);
    reach_level(&mut a, &mut board_a, 4);
    reach_level(&mut b, &mut board_b, 4);
    assert_eq!(a.sequence(), b.sequence());
}

#[test]
fn failing_round_five_scores_four() {
    let (mut game, mut board) = new_game(0x1);
    reach_level(&mut game, &mut board, 5);

    let sequence: Vec<Button> = game.sequence().to_vec();
    game.handle(Input::Press(sequence[0]), &mut board);
    game.handle(Input::Press(sequence[1]), &mut board);
    assert_eq!(game.input_index(), 2);
    game.handle(Input::Press(other(sequence[2])), &mut board);

    assert_eq!(game.phase(), Phase::Failure);
    assert_eq!(game.last_score(), 4);
    assert_eq!(board.last_report(), Some("GAME OVER 4\r\n"));

    game.handle(Input::Char(b'p'), &mut board);
    assert_eq!(board.last_report(), Some("SCORE 4\r\n"));
}

#[test]
fn qualifying_score_is_saved_under_typed_name() {
    let (mut game, mut board) = new_game(0x1);
    reach_level(&mut game, &mut board, 3);
    let expected = game.sequence()[0];
    game.handle(Input::Press(other(expected)), &mut board);

    wait(&mut game, &mut board);
    assert_eq!(game.phase(), Phase::NameEntry);
    game.handle(Input::Name("ALICE"), &mut board);

    assert_eq!(game.phase(), Phase::Attract);
    let best = game.highscores().get(0).unwrap();
    assert_eq!((best.name.as_str(), best.score), ("ALICE", 2));
    assert!(board.reports().any(|line| line.starts_with(" 1. ALICE")));
}

#[test]
fn full_table_skips_name_entry_for_low_scores() {
    let (mut game, mut board) = new_game(0x1);

    // Fill the table with zero scores
    for _ in 0..MAX_HIGHSCORES {
        wait(&mut game, &mut board);
        let expected = game.sequence()[0];
        game.handle(Input::Press(other(expected)), &mut board);
        wait(&mut game, &mut board);
        assert_eq!(game.phase(), Phase::NameEntry);
        game.handle(Input::Char(b'\r'), &mut board);
        game.handle(Input::Start, &mut board);
    }
    assert!(game.highscores().is_full());

    wait(&mut game, &mut board);
    let expected = game.sequence()[0];
    game.handle(Input::Press(other(expected)), &mut board);
    wait(&mut game, &mut board);
    assert_eq!(game.phase(), Phase::Attract);
    assert_eq!(board.last_report(), Some("READY\r\n"));
}

#[test]
fn reset_returns_to_attract_from_every_phase() {
    let phases = [
        Phase::Attract,
        Phase::Playback,
        Phase::AwaitInput,
        Phase::RoundComplete,
        Phase::Failure,
        Phase::NameEntry,
    ];

    for target in phases {
        let (mut game, mut board) = new_game(0x1);
        match target {
            Phase::Attract => game.handle(Input::Reset, &mut board),
            Phase::Playback => {}
            Phase::AwaitInput => wait(&mut game, &mut board),
            Phase::RoundComplete => {
                wait(&mut game, &mut board);
                replay(&mut game, &mut board);
            }
            Phase::Failure | Phase::NameEntry => {
                wait(&mut game, &mut board);
                let expected = game.sequence()[0];
                game.handle(Input::Press(other(expected)), &mut board);
                if target == Phase::NameEntry {
                    wait(&mut game, &mut board);
                }
            }
        }
        assert_eq!(game.phase(), target);

        game.handle(Input::Reset, &mut board);
        assert_eq!(game.phase(), Phase::Attract, "reset from {:?}", target);
        assert_eq!(game.level(), 0);
        assert_eq!(board.tone(), None);
        assert_eq!(board.frame(), Some(Frame::Idle(0)));
        assert_eq!(board.last_report(), Some("READY\r\n"));
    }
}

#[test]
fn escape_leaves_name_entry_without_saving() {
    let (mut game, mut board) = new_game(0x1);
    wait(&mut game, &mut board);
    let expected = game.sequence()[0];
    game.handle(Input::Press(other(expected)), &mut board);
    wait(&mut game, &mut board);

    game.handle(Input::Char(b'A'), &mut board);
    game.handle(Input::Char(0x1B), &mut board);
    assert_eq!(game.phase(), Phase::Attract);
    assert!(game.highscores().is_empty());
}

#[test]
fn pot_sample_mid_round_lands_next_round() {
    let (mut game, mut board) = new_game(0x1);
    let before = game.timing().delay_ms;

    game.handle(Input::Analog(0), &mut board);
    assert_eq!(board.last_report(), Some("DELAY 250 (0)\r\n"));
    assert_eq!(game.timing().delay_ms, before);

    wait(&mut game, &mut board);
    replay(&mut game, &mut board);
    wait(&mut game, &mut board);
    assert_eq!(game.timing().delay_ms, 250);
    assert_eq!(game.speed().pending(), None);
}

#[test]
fn console_lines_drive_a_session() {
    let mut board = RecordingBoard::new();
    let mut game = Simon::new(GameConfig::DEFAULT);
    game.reset(&mut board);

    let script = ["seed 1", "cmd n", "run"];
    for line in script {
        match parse_line(line).unwrap() {
            ConsoleCommand::Seed(seed) => game.handle(Input::Seed(seed), &mut board),
            ConsoleCommand::Key(key) => game.handle(Input::Char(key), &mut board),
            ConsoleCommand::Run => {
                game.run(&mut board, RUN_LIMIT_TICKS);
            }
            command => panic!("unexpected {:?}", command),
        }
    }

    assert_eq!(game.phase(), Phase::AwaitInput);
    assert_eq!(game.seed(), 1);
    assert_eq!(board.last_report(), Some("INPUT 1\r\n"));
}

#[test]
fn highscore_table_example_ordering() {
    let mut table = HighScoreTable::new();
    for score in [3, 9, 1, 9, 5, 2] {
        table.try_insert("P", score);
    }
    let scores: Vec<u16> = table.entries().iter().map(|e| e.score).collect();
    assert_eq!(scores, [9, 9, 5, 3, 2]);
}
