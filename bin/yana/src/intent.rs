/// Actions a voice utterance can resolve to. Matching is sequential and
/// first-match, over the lowercased command text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    PowerOn,
    PowerOff,
    SetTemperature(i64),
    ToggleLights,
    Status,
}

impl Intent {
    pub fn parse(command: &str) -> Option<Intent> {
        let command = command.to_lowercase();

        if command.contains("включи кондиционер") || command.contains("запусти кондиционер") {
            return Some(Intent::PowerOn);
        }

        if command.contains("выключи кондиционер") || command.contains("останови кондиционер") {
            return Some(Intent::PowerOff);
        }

        // "температура в комнате" has no number and falls through to Status.
        if command.contains("температур") {
            if let Some(value) = first_integer(&command) {
                return Some(Intent::SetTemperature(value));
            }
        }

        if command.contains("подсветк") {
            return Some(Intent::ToggleLights);
        }

        if command.contains("статус") || command.contains("температура в комнате") {
            return Some(Intent::Status);
        }

        None
    }
}

fn first_integer(s: &str) -> Option<i64> {
    let digits: String = s
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_commands() {
        assert_eq!(Intent::parse("Включи кондиционер"), Some(Intent::PowerOn));
        assert_eq!(
            Intent::parse("запусти кондиционер пожалуйста"),
            Some(Intent::PowerOn)
        );
        assert_eq!(Intent::parse("выключи кондиционер"), Some(Intent::PowerOff));
        assert_eq!(
            Intent::parse("останови кондиционер"),
            Some(Intent::PowerOff)
        );
    }

    #[test]
    fn test_temperature_command() {
        assert_eq!(
            Intent::parse("установи температуру 18"),
            Some(Intent::SetTemperature(18))
        );
        assert_eq!(
            Intent::parse("установи температуру 40"),
            Some(Intent::SetTemperature(40))
        );
        assert_eq!(Intent::parse("температура 25 градусов"), Some(Intent::SetTemperature(25)));
    }

    #[test]
    fn test_lights_command() {
        assert_eq!(Intent::parse("включи подсветку"), Some(Intent::ToggleLights));
        assert_eq!(Intent::parse("подсветка"), Some(Intent::ToggleLights));
    }

    #[test]
    fn test_status_command() {
        assert_eq!(Intent::parse("статус кондиционера"), Some(Intent::Status));
        assert_eq!(
            Intent::parse("какая температура в комнате"),
            Some(Intent::Status)
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(Intent::parse("расскажи анекдот"), None);
        assert_eq!(Intent::parse(""), None);
    }
}
