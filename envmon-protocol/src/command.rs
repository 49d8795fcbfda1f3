//! Host commands
//!
//! Commands are the trimmed lines produced by [`crate::LineBuffer`]. The
//! first comma-separated field is the command word (matched without regard
//! to ASCII case); the remaining fields are its arguments.

/// Argument separator
const ARG_SEPARATOR: char = ',';

/// Errors that can occur while parsing a host command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Command word not recognised
    Unknown,
    /// Wrong number of arguments, or an argument is not a number
    BadArguments,
}

/// Threshold band carried by `SET_THRESHOLD`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThresholdArgs {
    pub temp_min: f32,
    pub temp_max: f32,
    pub hum_min: f32,
    pub hum_max: f32,
}

/// Commands sent by the host
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostCommand {
    /// Host application attached
    Connect,
    /// Host application detaching
    Disconnect,
    /// Request the latest reading
    GetData,
    /// Replace the alert band
    SetThreshold(ThresholdArgs),
    /// Flip the threshold overlay flag
    ToggleThresholds,
    /// Liveness probe
    Ping,
}

impl HostCommand {
    /// Parse a command from a finalized line
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut fields = line.trim().split(ARG_SEPARATOR).map(str::trim);
        let word = fields.next().unwrap_or("");

        let command = if word.eq_ignore_ascii_case("CONNECT") {
            HostCommand::Connect
        } else if word.eq_ignore_ascii_case("DISCONNECT") {
            HostCommand::Disconnect
        } else if word.eq_ignore_ascii_case("GET_DATA") {
            HostCommand::GetData
        } else if word.eq_ignore_ascii_case("SET_THRESHOLD") {
            return parse_thresholds(&mut fields).map(HostCommand::SetThreshold);
        } else if word.eq_ignore_ascii_case("TOGGLE_THRESHOLDS") {
            HostCommand::ToggleThresholds
        } else if word.eq_ignore_ascii_case("PING") {
            HostCommand::Ping
        } else {
            return Err(CommandError::Unknown);
        };

        // Argument-less commands must not carry arguments
        if fields.next().is_some() {
            return Err(CommandError::BadArguments);
        }
        Ok(command)
    }
}

fn parse_thresholds<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
) -> Result<ThresholdArgs, CommandError> {
    let mut values = [0.0f32; 4];
    for value in values.iter_mut() {
        let field = fields.next().ok_or(CommandError::BadArguments)?;
        *value = field.parse().map_err(|_| CommandError::BadArguments)?;
        if !value.is_finite() {
            return Err(CommandError::BadArguments);
        }
    }
    if fields.next().is_some() {
        return Err(CommandError::BadArguments);
    }

    Ok(ThresholdArgs {
        temp_min: values[0],
        temp_max: values[1],
        hum_min: values[2],
        hum_max: values[3],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_commands() {
        assert_eq!(HostCommand::parse("CONNECT"), Ok(HostCommand::Connect));
        assert_eq!(HostCommand::parse("DISCONNECT"), Ok(HostCommand::Disconnect));
        assert_eq!(HostCommand::parse("GET_DATA"), Ok(HostCommand::GetData));
        assert_eq!(
            HostCommand::parse("TOGGLE_THRESHOLDS"),
            Ok(HostCommand::ToggleThresholds)
        );
        assert_eq!(HostCommand::parse("PING"), Ok(HostCommand::Ping));
    }

    #[test]
    fn test_command_word_ignores_case() {
        assert_eq!(HostCommand::parse("connect"), Ok(HostCommand::Connect));
        assert_eq!(HostCommand::parse("Get_Data"), Ok(HostCommand::GetData));
    }

    #[test]
    fn test_set_threshold() {
        let cmd = HostCommand::parse("SET_THRESHOLD,18.0,30.0,30.0,80.0").unwrap();
        assert_eq!(
            cmd,
            HostCommand::SetThreshold(ThresholdArgs {
                temp_min: 18.0,
                temp_max: 30.0,
                hum_min: 30.0,
                hum_max: 80.0,
            })
        );
    }

    #[test]
    fn test_set_threshold_accepts_spaces_and_integers() {
        let cmd = HostCommand::parse("SET_THRESHOLD, -10, 45 ,20,90").unwrap();
        assert_eq!(
            cmd,
            HostCommand::SetThreshold(ThresholdArgs {
                temp_min: -10.0,
                temp_max: 45.0,
                hum_min: 20.0,
                hum_max: 90.0,
            })
        );
    }

    #[test]
    fn test_set_threshold_bad_arguments() {
        assert_eq!(
            HostCommand::parse("SET_THRESHOLD,18,30,30"),
            Err(CommandError::BadArguments)
        );
        assert_eq!(
            HostCommand::parse("SET_THRESHOLD,18,30,30,80,1"),
            Err(CommandError::BadArguments)
        );
        assert_eq!(
            HostCommand::parse("SET_THRESHOLD,a,30,30,80"),
            Err(CommandError::BadArguments)
        );
        assert_eq!(
            HostCommand::parse("SET_THRESHOLD,NaN,30,30,80"),
            Err(CommandError::BadArguments)
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(HostCommand::parse("AT"), Err(CommandError::Unknown));
        assert_eq!(HostCommand::parse(""), Err(CommandError::Unknown));
    }

    #[test]
    fn test_unexpected_arguments() {
        assert_eq!(
            HostCommand::parse("PING,1"),
            Err(CommandError::BadArguments)
        );
    }
}
