use gree::{DeviceStatus, Property};
use quasar::{
    ActionCapability, ActionResult, Mode, ModeFunction, RangeFunction, StateCapability,
    StateProperty, ToggleFunction,
};
use serde_json::{json, Value};

use crate::{Error, Result};

pub const TEMPERATURE_MIN: f32 = 16.0;
pub const TEMPERATURE_MAX: f32 = 30.0;

/// Maps a platform capability onto the unit's property vocabulary.
/// The table is total: every representable capability/instance pair has a
/// property, unsupported pairs are rejected while parsing the request.
/// A temperature outside the supported range never produces a command.
pub fn prepare_command(capability: &StateCapability) -> Result<(Property, Value)> {
    match capability {
        StateCapability::OnOff { value } => Ok((Property::Power, switch(*value))),
        StateCapability::Range {
            function: RangeFunction::Temperature,
            value,
            relative: _,
        } => {
            if !(TEMPERATURE_MIN..=TEMPERATURE_MAX).contains(value) {
                return Err(Error::OutOfRange(*value));
            }

            Ok((Property::Temperature, json!(value.round() as u8)))
        }
        StateCapability::Mode {
            function: ModeFunction::Thermostat,
            mode,
        } => Ok((Property::Mode, json!(mode))),
        StateCapability::Mode {
            function: ModeFunction::FanSpeed,
            mode,
        } => Ok((Property::FanSpeed, json!(mode))),
        StateCapability::Toggle {
            function: ToggleFunction::Lights,
            value,
        } => Ok((Property::Lights, switch(*value))),
        StateCapability::Toggle {
            function: ToggleFunction::Swing,
            value,
        } => Ok((
            Property::SwingVert,
            json!(if *value { "full" } else { "default" }),
        )),
    }
}

fn switch(value: bool) -> Value {
    json!(if value { "on" } else { "off" })
}

/// The read direction: a status snapshot as platform capability states.
/// Never talks to the unit.
pub fn state_capabilities(status: &DeviceStatus) -> Vec<StateCapability> {
    vec![
        StateCapability::on_off(status.power.is_on()),
        StateCapability::range(RangeFunction::Temperature, f32::from(status.temperature)),
        StateCapability::mode(ModeFunction::Thermostat, thermostat_mode(status.mode)),
        StateCapability::mode(ModeFunction::FanSpeed, fan_speed_mode(status.fan_speed)),
        StateCapability::toggle(ToggleFunction::Lights, status.lights.is_on()),
        StateCapability::toggle(
            ToggleFunction::Swing,
            status.swing_vert != gree::Swing::Default,
        ),
    ]
}

pub fn state_properties(status: &DeviceStatus) -> Vec<StateProperty> {
    vec![StateProperty::temperature(status.current_temperature)]
}

pub fn prepare_response_capability(
    capability: &StateCapability,
    result: ActionResult,
) -> ActionCapability {
    match capability {
        StateCapability::OnOff { value: _ } => ActionCapability::on_off(result),
        StateCapability::Mode { function, mode: _ } => ActionCapability::mode(*function, result),
        StateCapability::Toggle { function, value: _ } => {
            ActionCapability::toggle(*function, result)
        }
        StateCapability::Range { function, .. } => ActionCapability::range(*function, result),
    }
}

fn thermostat_mode(mode: gree::Mode) -> Mode {
    match mode {
        gree::Mode::Auto => Mode::Auto,
        gree::Mode::Cool => Mode::Cool,
        gree::Mode::Heat => Mode::Heat,
        gree::Mode::Dry => Mode::Dry,
        gree::Mode::FanOnly => Mode::FanOnly,
    }
}

fn fan_speed_mode(speed: gree::FanSpeed) -> Mode {
    match speed {
        gree::FanSpeed::Auto => Mode::Auto,
        gree::FanSpeed::Low => Mode::Low,
        gree::FanSpeed::Medium => Mode::Medium,
        gree::FanSpeed::High => Mode::High,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gree::{FanSpeed, Swing, Switch};

    #[test]
    fn test_prepare_command() {
        assert_eq!(
            prepare_command(&StateCapability::on_off(true)).unwrap(),
            (Property::Power, json!("on"))
        );
        assert_eq!(
            prepare_command(&StateCapability::on_off(false)).unwrap(),
            (Property::Power, json!("off"))
        );

        assert_eq!(
            prepare_command(&StateCapability::range(RangeFunction::Temperature, 22.0)).unwrap(),
            (Property::Temperature, json!(22))
        );

        assert_eq!(
            prepare_command(&StateCapability::mode(ModeFunction::Thermostat, Mode::Heat)).unwrap(),
            (Property::Mode, json!("heat"))
        );
        assert_eq!(
            prepare_command(&StateCapability::mode(ModeFunction::FanSpeed, Mode::High)).unwrap(),
            (Property::FanSpeed, json!("high"))
        );

        assert_eq!(
            prepare_command(&StateCapability::toggle(ToggleFunction::Lights, true)).unwrap(),
            (Property::Lights, json!("on"))
        );
        assert_eq!(
            prepare_command(&StateCapability::toggle(ToggleFunction::Swing, true)).unwrap(),
            (Property::SwingVert, json!("full"))
        );
        assert_eq!(
            prepare_command(&StateCapability::toggle(ToggleFunction::Swing, false)).unwrap(),
            (Property::SwingVert, json!("default"))
        );
    }

    #[test]
    fn test_temperature_domain() {
        assert!(matches!(
            prepare_command(&StateCapability::range(RangeFunction::Temperature, 15.0)),
            Err(Error::OutOfRange(_))
        ));
        assert!(matches!(
            prepare_command(&StateCapability::range(RangeFunction::Temperature, 40.0)),
            Err(Error::OutOfRange(_))
        ));

        assert!(prepare_command(&StateCapability::range(RangeFunction::Temperature, 16.0)).is_ok());
        assert!(prepare_command(&StateCapability::range(RangeFunction::Temperature, 30.0)).is_ok());
    }

    #[test]
    fn test_status_round_trips_through_the_table() {
        let status = DeviceStatus {
            power: Switch::On,
            mode: gree::Mode::Heat,
            temperature: 23,
            fan_speed: FanSpeed::High,
            swing_vert: Swing::Full,
            lights: Switch::On,
            ..DeviceStatus::default()
        };

        let capabilities = state_capabilities(&status);

        assert_eq!(
            capabilities,
            vec![
                StateCapability::on_off(true),
                StateCapability::range(RangeFunction::Temperature, 23.0),
                StateCapability::mode(ModeFunction::Thermostat, Mode::Heat),
                StateCapability::mode(ModeFunction::FanSpeed, Mode::High),
                StateCapability::toggle(ToggleFunction::Lights, true),
                StateCapability::toggle(ToggleFunction::Swing, true),
            ]
        );

        // Every reported capability maps back to the property it came from.
        let properties: Vec<Property> = capabilities
            .iter()
            .map(|capability| prepare_command(capability).unwrap().0)
            .collect();

        assert_eq!(
            properties,
            vec![
                Property::Power,
                Property::Temperature,
                Property::Mode,
                Property::FanSpeed,
                Property::Lights,
                Property::SwingVert,
            ]
        );
    }

    #[test]
    fn test_state_properties() {
        let status = DeviceStatus {
            current_temperature: 21.5,
            ..DeviceStatus::default()
        };

        assert_eq!(
            state_properties(&status),
            vec![StateProperty::temperature(21.5)]
        );
    }

    #[test]
    fn test_prepare_response_capability() {
        assert_eq!(
            prepare_response_capability(&StateCapability::on_off(true), ActionResult::ok()),
            ActionCapability::on_off(ActionResult::ok())
        );

        assert_eq!(
            prepare_response_capability(
                &StateCapability::mode(ModeFunction::FanSpeed, Mode::Low),
                ActionResult::ok()
            ),
            ActionCapability::mode(ModeFunction::FanSpeed, ActionResult::ok())
        );

        assert_eq!(
            prepare_response_capability(
                &StateCapability::range(RangeFunction::Temperature, 20.0),
                ActionResult::ok()
            ),
            ActionCapability::range(RangeFunction::Temperature, ActionResult::ok())
        );

        assert_eq!(
            prepare_response_capability(
                &StateCapability::toggle(ToggleFunction::Swing, true),
                ActionResult::ok()
            ),
            ActionCapability::toggle(ToggleFunction::Swing, ActionResult::ok())
        );
    }
}
