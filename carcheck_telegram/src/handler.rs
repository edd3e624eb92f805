use crate::{Command, Error, Result, TelegramBot};
use carcheck_core::{Locale, Query, Report, format_report};
use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile, MessageId, ParseMode};
use tracing::{info, warn};
use url::Url;

/// Handle bot commands
async fn handle_command(
    bot: &TelegramBot,
    msg: &Message,
    cmd: Command,
    locale: Locale,
) -> Result<()> {
    info!("[chat {}] Command: {cmd:?}", msg.chat.id.0);
    bot.bot.send_message(msg.chat.id, cmd.reply(locale)).await?;
    Ok(())
}

/// Handle any message (commands or vehicle identifiers)
pub async fn handle_message(bot: TelegramBot, msg: Message) -> Result<()> {
    let chat_id = msg.chat.id;
    if !bot.is_allowed(chat_id.0) {
        return Err(Error::Unauthorized(chat_id.0));
    }

    let Some(text) = msg.text() else {
        return Ok(());
    };

    let locale = bot.locale_for(msg.from.as_ref().and_then(|u| u.language_code.as_deref()));

    if let Some(cmd) = Command::parse_from_text(text) {
        return handle_command(&bot, &msg, cmd, locale).await;
    }

    let query = match Query::parse(text) {
        Ok(query) => query,
        Err(e) => {
            info!("[chat {}] Rejected input {text:?}: {e}", chat_id.0);
            bot.bot
                .send_message(chat_id, locale.invalid_input_text())
                .await?;
            return Ok(());
        }
    };

    info!("[chat {}] Lookup: {query}", chat_id.0);

    let wait = bot.bot.send_message(chat_id, locale.wait_text()).await?;

    let Some(record) = bot.resolver.resolve(&query).await else {
        bot.bot
            .edit_message_text(chat_id, wait.id, locale.not_found_text())
            .await?;
        return Ok(());
    };

    let report = format_report(&record, locale);
    send_report(&bot, chat_id, wait.id, report).await
}

/// Sends the report as a photo caption when there is a usable image,
/// otherwise replaces the "please wait" message with it.
async fn send_report(
    bot: &TelegramBot,
    chat_id: ChatId,
    wait_id: MessageId,
    report: Report,
) -> Result<()> {
    if let Some(photo) = report.photo_url.as_deref() {
        match Url::parse(photo) {
            Ok(url) => {
                let sent = bot
                    .bot
                    .send_photo(chat_id, InputFile::url(url))
                    .caption(report.text.clone())
                    .parse_mode(ParseMode::Html)
                    .await;
                match sent {
                    Ok(_) => {
                        bot.bot.delete_message(chat_id, wait_id).await?;
                        return Ok(());
                    }
                    Err(e) => warn!("[chat {}] Failed to send photo {photo}: {e}", chat_id.0),
                }
            }
            Err(e) => warn!("[chat {}] Ignoring invalid photo URL {photo}: {e}", chat_id.0),
        }
    }

    bot.bot
        .edit_message_text(chat_id, wait_id, report.text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use carcheck_core::{ProviderError, Resolver, VehicleProvider, VehicleRecord};
    use mockito::{Matcher, Mock, Server, ServerGuard};
    use serde_json::json;
    use std::sync::Arc;

    const CHAT_ID: i64 = 42;
    const WAIT_ID: i32 = 10;

    struct FixedProvider(Option<VehicleRecord>);

    #[async_trait]
    impl VehicleProvider for FixedProvider {
        fn name(&self) -> &str {
            "Fixed"
        }

        async fn fetch(
            &self,
            _query: &Query,
        ) -> std::result::Result<Option<VehicleRecord>, ProviderError> {
            Ok(self.0.clone())
        }
    }

    fn telegram_bot(
        server: &ServerGuard,
        allowed: &[&str],
        record: Option<VehicleRecord>,
    ) -> TelegramBot {
        let allowed: Vec<String> = allowed.iter().map(ToString::to_string).collect();
        let provider: Arc<dyn VehicleProvider> = Arc::new(FixedProvider(record));
        let resolver = Arc::new(Resolver::new(vec![provider]));
        let mut bot =
            TelegramBot::new("123:abc".to_string(), resolver, Locale::Ru, &allowed).unwrap();
        bot.bot = bot.bot.set_api_url(Url::parse(&server.url()).unwrap());
        bot
    }

    fn incoming(chat_id: i64, text: &str) -> Message {
        serde_json::from_value(json!({
            "message_id": 1,
            "date": 1_700_000_000,
            "chat": {"id": chat_id, "type": "private", "first_name": "Test"},
            "from": {"id": chat_id, "is_bot": false, "first_name": "Test", "language_code": "en"},
            "text": text,
        }))
        .unwrap()
    }

    fn sent_message(id: i32, text: &str) -> String {
        json!({
            "ok": true,
            "result": {
                "message_id": id,
                "date": 1_700_000_000,
                "chat": {"id": CHAT_ID, "type": "private", "first_name": "Test"},
                "text": text,
            }
        })
        .to_string()
    }

    fn method(name: &str) -> Matcher {
        Matcher::Regex(format!("(?i)/{name}$"))
    }

    async fn expect_text(
        server: &mut ServerGuard,
        api_method: &str,
        text: &str,
        hits: usize,
    ) -> Mock {
        server
            .mock("POST", method(api_method))
            .match_body(Matcher::PartialJson(json!({ "text": text })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(sent_message(WAIT_ID, text))
            .expect(hits)
            .create_async()
            .await
    }

    async fn expect_call(
        server: &mut ServerGuard,
        api_method: &str,
        status: usize,
        body: String,
        hits: usize,
    ) -> Mock {
        server
            .mock("POST", method(api_method))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(hits)
            .create_async()
            .await
    }

    fn record_with_photo() -> VehicleRecord {
        let mut record = VehicleRecord::new("Fixed");
        record.set_vendor("TOYOTA");
        record.set_model("CAMRY");
        record.set_photo_url(Some("https://img.example/camry.jpg".to_string()));
        record
    }

    #[tokio::test]
    async fn invalid_identifier_gets_the_invalid_input_text() {
        let mut server = Server::new_async().await;
        let reply = expect_text(
            &mut server,
            "sendMessage",
            Locale::En.invalid_input_text(),
            1,
        )
        .await;
        let wait = expect_text(&mut server, "sendMessage", Locale::En.wait_text(), 0).await;

        let bot = telegram_bot(&server, &[], None);
        handle_message(bot, incoming(CHAT_ID, "AB!")).await.unwrap();

        reply.assert_async().await;
        wait.assert_async().await;
    }

    #[tokio::test]
    async fn not_found_edits_the_wait_message() {
        let mut server = Server::new_async().await;
        let wait = expect_text(&mut server, "sendMessage", Locale::En.wait_text(), 1).await;
        let edit = expect_text(
            &mut server,
            "editMessageText",
            Locale::En.not_found_text(),
            1,
        )
        .await;

        let bot = telegram_bot(&server, &[], None);
        handle_message(bot, incoming(CHAT_ID, "AA1234BC")).await.unwrap();

        wait.assert_async().await;
        edit.assert_async().await;
    }

    #[tokio::test]
    async fn report_without_photo_replaces_the_wait_message() {
        let mut record = record_with_photo();
        record.set_photo_url(None);
        let report = format_report(&record, Locale::En);

        let mut server = Server::new_async().await;
        let wait = expect_text(&mut server, "sendMessage", Locale::En.wait_text(), 1).await;
        let edit = expect_text(&mut server, "editMessageText", &report.text, 1).await;
        let photo = expect_call(&mut server, "sendPhoto", 200, sent_message(11, ""), 0).await;

        let bot = telegram_bot(&server, &[], Some(record));
        handle_message(bot, incoming(CHAT_ID, "AA1234BC")).await.unwrap();

        wait.assert_async().await;
        edit.assert_async().await;
        photo.assert_async().await;
    }

    #[tokio::test]
    async fn photo_report_is_sent_and_the_wait_message_deleted() {
        let mut server = Server::new_async().await;
        let wait = expect_text(&mut server, "sendMessage", Locale::En.wait_text(), 1).await;
        let photo = expect_call(&mut server, "sendPhoto", 200, sent_message(11, ""), 1).await;
        let delete = expect_call(
            &mut server,
            "deleteMessage",
            200,
            json!({"ok": true, "result": true}).to_string(),
            1,
        )
        .await;
        let edit = expect_call(
            &mut server,
            "editMessageText",
            200,
            sent_message(WAIT_ID, ""),
            0,
        )
        .await;

        let bot = telegram_bot(&server, &[], Some(record_with_photo()));
        handle_message(bot, incoming(CHAT_ID, "AA1234BC")).await.unwrap();

        wait.assert_async().await;
        photo.assert_async().await;
        delete.assert_async().await;
        edit.assert_async().await;
    }

    #[tokio::test]
    async fn failed_photo_falls_back_to_the_text_report() {
        let record = record_with_photo();
        let report = format_report(&record, Locale::En);

        let mut server = Server::new_async().await;
        let wait = expect_text(&mut server, "sendMessage", Locale::En.wait_text(), 1).await;
        let photo = expect_call(
            &mut server,
            "sendPhoto",
            400,
            json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: wrong type of the web page content"
            })
            .to_string(),
            1,
        )
        .await;
        let delete = expect_call(
            &mut server,
            "deleteMessage",
            200,
            json!({"ok": true, "result": true}).to_string(),
            0,
        )
        .await;
        let edit = expect_text(&mut server, "editMessageText", &report.text, 1).await;

        let bot = telegram_bot(&server, &[], Some(record));
        handle_message(bot, incoming(CHAT_ID, "AA1234BC")).await.unwrap();

        wait.assert_async().await;
        photo.assert_async().await;
        delete.assert_async().await;
        edit.assert_async().await;
    }

    #[tokio::test]
    async fn chat_outside_the_allowlist_is_rejected() {
        let mut server = Server::new_async().await;
        let any = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let bot = telegram_bot(&server, &["42"], Some(record_with_photo()));
        let result = handle_message(bot, incoming(7, "AA1234BC")).await;

        assert!(matches!(result, Err(Error::Unauthorized(7))));
        any.assert_async().await;
    }
}
