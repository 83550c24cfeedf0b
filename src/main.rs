use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::*;
use deskcalc::config::{load_settings, Palette, Settings};
use deskcalc::keys::{self, from_keypad};
use deskcalc::render::{plain, primary_line, secondary_line};
use deskcalc::{CalcError, Calculator, SizeClass};
use rustyline::{error::ReadlineError, Config, DefaultEditor};
use termion::event::Key as TermKey;
use termion::input::TermRead;
use termion::raw::IntoRawMode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Settings file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,
    /// More log output on stderr; repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Raw keypad mode: every keystroke is a calculator key
    #[arg(long)]
    keypad: bool,
    /// Keys to press once, e.g. `7 + 5 =`, then exit
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    keys: Vec<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = match load_settings(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    let colours = &settings.colours;
    let mut calc = Calculator::new();

    let outcome = if !args.keys.is_empty() {
        run_once(&mut calc, &args.keys.join(" "), colours)
    } else if args.keypad || settings.keypad {
        run_keypad(&mut calc, colours)
    } else {
        run_lines(&mut calc, &settings)
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!(
                "{}",
                err.to_string()
                    .truecolor(colours.error.0, colours.error.1, colours.error.2)
            );
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_once(calc: &mut Calculator, line: &str, colours: &Palette) -> Result<(), CalcError> {
    let keys = keys::parse_line(line)?;
    calc.press_all(&keys);
    print_display(calc, colours);
    Ok(())
}

fn run_lines(calc: &mut Calculator, settings: &Settings) -> Result<(), CalcError> {
    let colours = &settings.colours;
    let config = Config::builder().build();
    let mut rl = DefaultEditor::with_config(config)?;

    print_display(calc, colours);
    loop {
        let readline = rl.readline(&settings.prompt);
        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    println!("Goodbye!");
                    break;
                }
                rl.add_history_entry(line.as_str())?;

                if let Some(command) = line.trim().strip_prefix(':') {
                    run_command(command.trim(), calc, colours);
                    continue;
                }

                debug!(line = %line, "processing input");
                match keys::parse_line(&line) {
                    Ok(keys) => {
                        calc.press_all(&keys);
                        print_display(calc, colours);
                    }
                    Err(err) => {
                        if let CalcError::UnknownKey { column, .. } = &err {
                            println!(
                                "{}{}",
                                " ".repeat(settings.prompt.chars().count() + column),
                                "^".truecolor(colours.carat.0, colours.carat.1, colours.carat.2)
                            );
                        }
                        println!(
                            "{}",
                            err.to_string()
                                .truecolor(colours.error.0, colours.error.1, colours.error.2)
                        );
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Pressing enter with no input will exit as well.");
                break;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn print_display(calc: &Calculator, colours: &Palette) {
    for line in [secondary_line(calc, colours), primary_line(calc, colours)] {
        print!("  ");
        for coloured_string in line {
            print!("{}", coloured_string);
        }
        println!();
    }
}

fn message(text: &str, colours: &Palette) {
    println!(
        "{}",
        text.truecolor(colours.message.0, colours.message.1, colours.message.2)
    );
}

fn run_command(command: &str, calc: &Calculator, colours: &Palette) {
    match command {
        s if s.eq_ignore_ascii_case("help") => message(HELP, colours),
        s if s.eq_ignore_ascii_case("state") => {
            message(&format!("entry      {}", calc.current_entry()), colours);
            message(
                &format!("saved      {}", calc.saved_result().unwrap_or("-")),
                colours,
            );
            message(
                &format!(
                    "pending    {}",
                    calc.pending_operation()
                        .map(|op| format!("{:?}", op))
                        .unwrap_or_else(|| "-".to_owned())
                ),
                colours,
            );
            message(&format!("first      {}", calc.first_operand()), colours);
            message(&format!("second     {}", calc.second_operand()), colours);
            message(&format!("expression {}", calc.expression_text()), colours);
            message(&format!("result     {}", calc.result_text()), colours);
            message(&size_line(calc.size_class()), colours);
        }
        s if s.eq_ignore_ascii_case("history") => {
            if calc.history().is_empty() {
                message("There's no history yet.", colours);
            }
            for entry in calc.history() {
                message(&format!("{}  {}", entry.expression, entry.result), colours);
            }
        }
        s if s.eq_ignore_ascii_case("test") => {
            let (passed, total) = run_tests(colours);
            message(&format!("{}/{} tests passed.", passed, total), colours);
        }
        _ => println!(
            "{}",
            "Unknown command!".truecolor(colours.error.0, colours.error.1, colours.error.2)
        ),
    }
}

fn size_line(size: SizeClass) -> String {
    format!(
        "size       {:?} ({}px text, {}px gap)",
        size,
        size.font_px(),
        size.run_gap_px()
    )
}

const HELP: &str = "\
Type keys and press enter, e.g. `7 + 5 =` or `9 sqrt`.
  0-9 , .          digits and decimal point
  + - * x / %      operators (% takes a percentage of the pending operand)
  1/x sqr sqrt     inverse (also /x after a number), square, square root
  =                equals
  ce c bs neg      clear entry, clear all, backspace, toggle sign
  :state :history :test :help
An empty line exits.";

fn run_keypad(calc: &mut Calculator, colours: &Palette) -> Result<(), CalcError> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().into_raw_mode()?;
    info!("keypad mode");

    draw_keypad(&mut stdout, calc, colours)?;
    for key in stdin.keys() {
        match key? {
            TermKey::Ctrl('c') | TermKey::Ctrl('d') => break,
            key => match from_keypad(key) {
                Some(key) => {
                    calc.press(key);
                    draw_keypad(&mut stdout, calc, colours)?;
                }
                None => debug!(?key, "unmapped keystroke"),
            },
        }
    }

    write!(stdout, "\r\n")?;
    stdout.flush()?;
    Ok(())
}

fn draw_keypad<W: Write>(out: &mut W, calc: &Calculator, colours: &Palette) -> io::Result<()> {
    write!(out, "{}{}", termion::clear::All, termion::cursor::Goto(1, 1))?;
    for line in [secondary_line(calc, colours), primary_line(calc, colours)] {
        write!(out, "  ")?;
        for coloured_string in line {
            write!(out, "{}", coloured_string)?;
        }
        write!(out, "\r\n")?;
    }
    write!(
        out,
        "\r\n{}\r\n",
        "r 1/x  q x²  @ √  n ±  Del CE  Esc C  Ctrl-C quit".truecolor(
            colours.message.0,
            colours.message.1,
            colours.message.2
        )
    )?;
    out.flush()
}

fn run_tests(colours: &Palette) -> (usize, usize) {
    let tests = [
        // (keys, expression line, result line)
        ("7 + 5 =", "7 + 5 =", "12"),
        ("9 sqrt", "√( 9 ) =", "3"),
        ("5 / 0 =", "5 ÷ 0 =", "Infinity"),
        ("0 / 0 =", "0 ÷ 0 =", "Error"),
        ("7 + 5 ce 3 =", "7 + 3 =", "10"),
        ("200 / 50 %", "200 ÷ 100", "100"),
        ("200 / 50 % =", "200 ÷ 100 =", "2"),
        ("50 %", "0", "0"),
        ("4 1/x", "1/( 4 ) =", "0,25"),
        ("1 / 3 =", "1 ÷ 3 =", "0,333333"),
        ("1234567 x 2 =", "1234567 × 2 =", "2  469  134"),
        ("100000 x 100000 =", "100000 × 100000 =", "10 000 000 000"),
        ("100000 x 100001 =", "100000 × 100001 =", "Infinity"),
        ("12 neg sqr", "sqr( -12 ) =", "144"),
        ("7 + 5 = neg", "7 + 5 =", "-12"),
        ("1,,5 bs bs", "", "1"),
        ("123456789012345", "", "12 345 678 901"),
        ("3 + 4 = c", "", "0"),
    ];

    let mut passed = 0;
    let total = tests.len();

    for (input, expression, result) in tests {
        println!("> {}", input);

        let mut calc = Calculator::new();
        let outcome = keys::parse_line(input).map(|keys| calc.press_all(&keys));
        print_display(&calc, colours);

        let got = (
            plain(&secondary_line(&calc, colours)),
            plain(&primary_line(&calc, colours)),
        );
        if outcome.is_ok() && got == (expression.to_owned(), result.to_owned()) {
            println!("{}", "Pass!".green());
            passed += 1;
        } else {
            println!("{}", "fail!".red());
            println!("Wanted: '{}' / '{}'", expression, result);
            println!("Got   : '{}' / '{}'", got.0, got.1);
        }

        println!();
    }

    (passed, total)
}
