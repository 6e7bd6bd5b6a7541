use crate::api::ranking::to_ranked;
use crate::models::{CommandKind, CommandRequest, CommandResponse};
use crate::services::command::{
    parse_command, ChatCommand, EMPTY_RESULT_TEXT, GREETING_TEXT, HELP_TEXT,
};
use crate::services::search_service;
use crate::AppState;
use log::info;
use rocket::serde::json::Json;
use rocket::{post, State};

fn reply(kind: CommandKind, message: &str) -> CommandResponse {
    CommandResponse {
        kind,
        title: None,
        message: Some(message.to_string()),
        videos: vec![],
    }
}

#[post("/", data = "<request>")]
pub async fn post_command(
    request: Json<CommandRequest>,
    state: &State<AppState>,
) -> Json<CommandResponse> {
    let text = request.into_inner().text;

    let intent = match parse_command(&text) {
        ChatCommand::Greeting => return Json(reply(CommandKind::Greeting, GREETING_TEXT)),
        ChatCommand::Help => return Json(reply(CommandKind::Help, HELP_TEXT)),
        ChatCommand::Rank(intent) => intent,
    };

    info!("Chat command '{}' -> {}", text.trim(), intent.title());
    let videos = search_service::run(state.gateway.as_ref(), &intent, &state.settings).await;

    Json(CommandResponse {
        kind: CommandKind::Ranking,
        title: Some(intent.title()),
        message: videos.is_empty().then(|| EMPTY_RESULT_TEXT.to_string()),
        videos: to_ranked(videos),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::search_service::testing::FakeGateway;
    use crate::test_client;
    use chrono::{Duration, SecondsFormat, Utc};
    use rocket::http::{ContentType, Status};

    fn send(client: &rocket::local::blocking::Client, text: &str) -> CommandResponse {
        let response = client
            .post("/api/command")
            .header(ContentType::JSON)
            .body(serde_json::json!({ "text": text }).to_string())
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        response.into_json().expect("command json")
    }

    #[test]
    fn greeting_and_help_do_not_search() {
        let client = test_client(FakeGateway::default());

        let greeting = send(&client, "嗨");
        assert_eq!(greeting.kind, CommandKind::Greeting);
        assert_eq!(greeting.message.as_deref(), Some(GREETING_TEXT));

        let help = send(&client, "說明");
        assert_eq!(help.kind, CommandKind::Help);
        assert!(help.videos.is_empty());
    }

    #[test]
    fn empty_ranking_explains_itself() {
        let client = test_client(FakeGateway::default());
        let response = send(&client, "觀看次數");
        assert_eq!(response.kind, CommandKind::Ranking);
        assert_eq!(response.title.as_deref(), Some("48小時內ETF熱門影片"));
        assert_eq!(response.message.as_deref(), Some(EMPTY_RESULT_TEXT));
    }

    #[test]
    fn chat_ranking_is_capped_at_five() {
        let published =
            (Utc::now() - Duration::hours(3)).to_rfc3339_opts(SecondsFormat::Secs, true);
        let gateway = (0..7).fold(FakeGateway::default(), |gateway, i| {
            gateway.with_video(
                "台灣ETF",
                &format!("c{i}"),
                &format!("0050 ETF 第{i}集"),
                "理財小達人",
                &published,
                &format!("{}", 1000 + i * 100),
            )
        });
        let client = test_client(gateway);

        let response = send(&client, "24小時");
        assert_eq!(response.title.as_deref(), Some("24小時內ETF熱門影片"));
        assert_eq!(response.message, None);
        assert_eq!(response.videos.len(), 5);
        assert_eq!(response.videos[0].video.video_id, "c6");
    }
}
