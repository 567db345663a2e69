use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use gree::Property;
use log::{error, info};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{AppState, Intent, TEMPERATURE_MAX, TEMPERATURE_MIN};

#[derive(Debug, Deserialize)]
pub struct WebhookRequest {
    pub request: Utterance,
    pub session: Value,
    pub version: String,
}

#[derive(Debug, Deserialize)]
pub struct Utterance {
    #[serde(default)]
    pub command: String,

    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub payload: Option<ButtonPayload>,
}

#[derive(Debug, Deserialize)]
pub struct ButtonPayload {
    pub action: String,
}

const FAILURE_TEXT: &str = "Произошла ошибка при выполнении команды";

pub async fn webhook(
    State(state): State<AppState>,
    Json(request): Json<WebhookRequest>,
) -> impl IntoResponse {
    info!("voice command: {:?}", request.request.command);

    let text = match request.request.kind.as_str() {
        "SimpleUtterance" => handle_utterance(&state, &request.request.command).await,
        "ButtonPressed" => handle_button(&state, request.request.payload.as_ref()).await,
        _ => "Неизвестная команда".to_string(),
    };

    // The envelope always echoes session and version back to the platform.
    Json(json!({
        "version": request.version,
        "session": request.session,
        "response": {
            "text": text,
            "end_session": false,
        }
    }))
}

async fn handle_utterance(state: &AppState, command: &str) -> String {
    match Intent::parse(command) {
        Some(Intent::PowerOn) => set_power(state, true).await,
        Some(Intent::PowerOff) => set_power(state, false).await,
        Some(Intent::SetTemperature(value)) => {
            let (property, value, reply) = match prepare_temperature(value) {
                Ok(command) => command,
                Err(rejection) => return rejection,
            };

            match state.relay.command(property, &value).await {
                Ok(()) => reply,
                Err(err) => {
                    error!("temperature command failed: {err}");
                    FAILURE_TEXT.to_string()
                }
            }
        }
        Some(Intent::ToggleLights) => toggle_lights(state).await,
        Some(Intent::Status) => report_status(state).await,
        None => {
            "Не понимаю команду. Попробуйте сказать «включи кондиционер» или «статус кондиционера»"
                .to_string()
        }
    }
}

async fn handle_button(state: &AppState, payload: Option<&ButtonPayload>) -> String {
    match payload.map(|payload| payload.action.as_str()) {
        Some("turn_on") => set_power(state, true).await,
        Some("turn_off") => set_power(state, false).await,
        _ => "Неизвестное действие".to_string(),
    }
}

/// Range-checks a spoken temperature. A value outside the supported
/// domain yields the rejection text and no command at all.
fn prepare_temperature(value: i64) -> Result<(Property, Value, String), String> {
    if value < TEMPERATURE_MIN as i64 || value > TEMPERATURE_MAX as i64 {
        return Err("Температура должна быть от 16 до 30 градусов".to_string());
    }

    Ok((
        Property::Temperature,
        json!(value),
        format!("Температура установлена на {value} градусов"),
    ))
}

async fn set_power(state: &AppState, on: bool) -> String {
    let value = json!(if on { "on" } else { "off" });

    match state.relay.command(Property::Power, &value).await {
        Ok(()) => {
            if on {
                "Кондиционер включен".to_string()
            } else {
                "Кондиционер выключен".to_string()
            }
        }
        Err(err) => {
            error!("power command failed: {err}");
            FAILURE_TEXT.to_string()
        }
    }
}

async fn toggle_lights(state: &AppState) -> String {
    let status = match state.relay.status().await {
        Ok(status) => status,
        Err(err) => {
            error!("status fetch failed: {err}");
            return FAILURE_TEXT.to_string();
        }
    };

    let turn_on = !status.device_status.lights.is_on();
    let value = json!(if turn_on { "on" } else { "off" });

    match state.relay.command(Property::Lights, &value).await {
        Ok(()) => {
            if turn_on {
                "Подсветка включена".to_string()
            } else {
                "Подсветка выключена".to_string()
            }
        }
        Err(err) => {
            error!("lights command failed: {err}");
            FAILURE_TEXT.to_string()
        }
    }
}

async fn report_status(state: &AppState) -> String {
    let status = match state.relay.status().await {
        Ok(status) => status,
        Err(err) => {
            error!("status fetch failed: {err}");
            return FAILURE_TEXT.to_string();
        }
    };

    let power = if status.device_status.power.is_on() {
        "включен"
    } else {
        "выключен"
    };

    if status.device_status.current_temperature != 0.0 {
        format!(
            "Кондиционер {power}. Текущая температура {} градусов",
            status.device_status.current_temperature
        )
    } else {
        format!("Кондиционер {power}.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::from_value;

    #[test]
    fn test_request_parsing() {
        let request: WebhookRequest = from_value(json!({
            "request": {"command": "включи кондиционер", "type": "SimpleUtterance"},
            "session": {"session_id": "abc", "user_id": "chipp"},
            "version": "1.0"
        }))
        .unwrap();

        assert_eq!(request.request.command, "включи кондиционер");
        assert_eq!(request.request.kind, "SimpleUtterance");
        assert_eq!(request.version, "1.0");

        let request: WebhookRequest = from_value(json!({
            "request": {"type": "ButtonPressed", "payload": {"action": "turn_on"}},
            "session": {},
            "version": "1.0"
        }))
        .unwrap();

        assert_eq!(request.request.command, "");
        assert_eq!(
            request.request.payload.map(|payload| payload.action),
            Some("turn_on".to_string())
        );
    }

    #[test]
    fn test_temperature_is_range_checked() {
        let (property, value, reply) = prepare_temperature(18).unwrap();
        assert_eq!(property, Property::Temperature);
        assert_eq!(value, json!(18));
        assert_eq!(reply, "Температура установлена на 18 градусов");

        assert_eq!(
            prepare_temperature(40),
            Err("Температура должна быть от 16 до 30 градусов".to_string())
        );
        assert_eq!(
            prepare_temperature(15),
            Err("Температура должна быть от 16 до 30 градусов".to_string())
        );

        assert!(prepare_temperature(16).is_ok());
        assert!(prepare_temperature(30).is_ok());
    }
}
