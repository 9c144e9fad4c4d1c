use coin_pulse_core::models::alert::AlertMode;
use coin_pulse_core::models::command::Command;
use coin_pulse_core::models::symbol::Symbol;

/// What one line typed at the prompt asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Command(Command),
    /// Bind this text to the price input and submit it for the selected coin.
    Buy(String),
    Export,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  buy <price>            record a buy of the selected coin
  buy <coin> <price>     record a buy of another coin
  rm <index>             remove the position at <index>
  clear                  remove every position
  coin <KUB|VELO|UNI>    chart another coin
  target <percent>       set the profit target
  alert <every|once>     fire on every update, or once per crossing
  export                 print the ledger as JSON
  help | quit";

/// Parse one prompt line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Input>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let input = match (verb.to_lowercase().as_str(), args.as_slice()) {
        ("buy" | "add", [price]) => Input::Buy(price.to_string()),
        ("buy" | "add", [coin, price]) => Input::Command(Command::AddPosition {
            symbol: parse_symbol(coin)?,
            raw_price: price.to_string(),
        }),
        ("rm" | "remove", [index]) => {
            let index = index
                .parse()
                .map_err(|_| format!("'{index}' is not a position index"))?;
            Input::Command(Command::RemovePosition(index))
        }
        ("clear", []) => Input::Command(Command::ClearPositions),
        ("coin" | "select", [coin]) => Input::Command(Command::SelectSymbol(parse_symbol(coin)?)),
        ("target", [percent]) => {
            let percent: f64 = percent
                .parse()
                .map_err(|_| format!("'{percent}' is not a number"))?;
            Input::Command(Command::SetTargetPercent(percent))
        }
        ("alert", ["every"]) => Input::Command(Command::SetAlertMode(AlertMode::EveryEvaluation)),
        ("alert", ["once"]) => Input::Command(Command::SetAlertMode(AlertMode::EdgeTriggered)),
        ("export", []) => Input::Export,
        ("help" | "?", []) => Input::Help,
        ("quit" | "exit" | "q", []) => Input::Quit,
        _ => return Err(format!("unrecognized command: {}", line.trim())),
    };
    Ok(Some(input))
}

fn parse_symbol(raw: &str) -> Result<Symbol, String> {
    raw.parse::<Symbol>().map_err(|e| e.to_string())
}
