//! OTP Example - Six-digit one-time-code entry in the terminal
//!
//! Type digits to fill the field, Backspace to correct, paste a whole code
//! at once. When the last digit lands the code is shown below the field.
//!
//! - Esc quits
//! - Ctrl+R resets the field
//!
//! Logs go to stderr; set `RUST_LOG=spark_pin=debug` to watch the transitions.
//!
//! Run with: cargo run --example otp 2>otp.log

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::style::Print;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use tracing_subscriber::EnvFilter;

use spark_pin::{
    compute_field_layout, draw_field, poll_event, route_event, InputEvent, PinField,
    PinFieldConfig, Rgba, TerminalRenderer,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = PinFieldConfig::new(6)
        .with_spacing(1)
        .with_selected_border_color(Rgba::GREEN)
        .with_midpoint_gap(true);
    let layout = compute_field_layout(&config)?;
    let mut field = PinField::new(config)?;

    let status: Rc<RefCell<String>> = Rc::new(RefCell::new(String::new()));
    let status_clone = status.clone();
    let _ = field.on_complete(move |code| {
        *status_clone.borrow_mut() = format!("Code entered: {code}");
    });
    field.focus();

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste, Hide, Clear(ClearType::All))?;

    let result = run(&mut stdout, &mut field, &layout, &status);

    // Restore the terminal even if the loop failed
    execute!(stdout, Show, DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result?;

    println!("{}", status.borrow());
    Ok(())
}

fn run(
    stdout: &mut io::Stdout,
    field: &mut PinField,
    layout: &spark_pin::FieldLayout,
    status: &Rc<RefCell<String>>,
) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let (x, y) = centered(layout, cols, rows);
    let mut renderer = TerminalRenderer::new(x, y);

    loop {
        renderer.render(stdout, &draw_field(field, layout))?;

        let (x, y) = renderer.origin();
        let status_row = y + layout.height + 1;
        queue!(
            stdout,
            MoveTo(x, status_row),
            Clear(ClearType::CurrentLine),
            Print(status.borrow().as_str()),
            MoveTo(x, status_row + 1),
            Print("Esc: quit   Ctrl+R: reset"),
        )?;
        stdout.flush()?;

        let Some(event) = poll_event(Duration::from_millis(50))? else {
            continue;
        };

        match &event {
            InputEvent::Key(key) if key.key == "Escape" => return Ok(()),
            InputEvent::Key(key) if key.modifiers.ctrl && key.key == "r" => {
                field.reset();
                field.focus();
                status.borrow_mut().clear();
                continue;
            }
            InputEvent::Resize(cols, rows) => {
                execute!(stdout, Clear(ClearType::All))?;
                let (x, y) = centered(layout, *cols, *rows);
                renderer.set_origin(x, y);
                renderer.invalidate();
                continue;
            }
            _ => {}
        }

        route_event(field, event);
    }
}

/// Top-left corner that centers the field, leaving room for two status rows.
fn centered(layout: &spark_pin::FieldLayout, cols: u16, rows: u16) -> (u16, u16) {
    let x = cols.saturating_sub(layout.width) / 2;
    let y = rows.saturating_sub(layout.height + 3) / 2;
    (x, y)
}
