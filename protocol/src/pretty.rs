use crate::register::RegisterWrite;
use crate::types::{ClimateState, HvacMode};

pub fn pretty_print_state(
    out: &mut dyn core::fmt::Write,
    state: &ClimateState,
    use_color: bool,
) -> core::fmt::Result {
    let mode_color = color(use_color, match state.hvac_mode {
        HvacMode::Off => "\x1b[2m",
        HvacMode::Cool => "\x1b[1;36m",
        HvacMode::Heat => "\x1b[1;31m",
        HvacMode::Auto => "\x1b[1;32m",
    });
    let reset = color(use_color, "\x1b[0m");
    let dim = color(use_color, "\x1b[90m");

    writeln!(out, "{mode_color}{mode}{reset} {dim}fan:{reset} {fan}",
        mode = state.hvac_mode,
        fan = state.fan_mode,
    )?;

    write!(out, "  target: ")?;
    write_temperature(out, state.target_temperature)?;
    write!(out, "  current: ")?;
    write_temperature(out, state.current_temperature)?;
    writeln!(out, "  {dim}range: {:.1} .. {:.1}{reset}",
        state.min_temperature,
        state.max_temperature,
    )?;

    Ok(())
}

pub fn pretty_print_writes(
    out: &mut dyn core::fmt::Write,
    writes: &[RegisterWrite],
    use_color: bool,
) -> core::fmt::Result {
    let code_color = color(use_color, "\x1b[1;33m");
    let reset = color(use_color, "\x1b[0m");

    if writes.is_empty() {
        writeln!(out, "  (no writes)")?;
    }

    for write in writes {
        writeln!(out, "  {code_color}{}{reset} => {:?}", write.code, write.value)?;
    }

    Ok(())
}

fn write_temperature(out: &mut dyn core::fmt::Write, temp: Option<f32>) -> core::fmt::Result {
    match temp {
        Some(temp) => writeln!(out, "{temp:.1}"),
        None => writeln!(out, "-"),
    }
}

fn color(use_color: bool, s: &str) -> &str {
    if use_color {
        s
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FanMode;

    #[test]
    fn plain_state() {
        let state = ClimateState {
            hvac_mode: HvacMode::Heat,
            fan_mode: FanMode::Low,
            target_temperature: Some(22.0),
            current_temperature: None,
            min_temperature: 18.0,
            max_temperature: 30.0,
        };

        let mut rendered = String::new();
        pretty_print_state(&mut rendered, &state, false).unwrap();

        assert_eq!(rendered, "heat fan: low\n  target: 22.0\n  current: -\n  range: 18.0 .. 30.0\n");
    }

    #[test]
    fn plain_writes() {
        let mut rendered = String::new();
        pretty_print_writes(&mut rendered, &[RegisterWrite::new("power", "0")], false).unwrap();
        assert_eq!(rendered, "  power => \"0\"\n");
    }
}
