use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::language::Direction;
use crate::state::AppState;
use crate::telegram::{ChatId, ParseMode, Update};
use crate::translate::TranslationRequest;

pub const HELP_TEXT: &str = "🤖 <b>翻译机器人帮助</b>

<b>📋 可用命令：</b>
/help - 显示此帮助信息
/on - 开启翻译功能
/off - 关闭翻译功能

<b>🔄 翻译规则：</b>
• 中文消息 → 自动翻译成英文
• 英文消息 → 自动翻译成中文

<b>📝 使用方法：</b>
1. 发送 /on 开启翻译
2. 直接发送文字即可自动翻译
3. 发送 /off 关闭翻译";

pub const ENABLED_TEXT: &str = "✅ 翻译功能已开启！\n\n发送任意文字即可自动翻译。";
pub const DISABLED_TEXT: &str = "❌ 翻译功能已关闭。\n\n发送 /on 可重新开启。";
pub const FAILURE_TEXT: &str = "❌ 翻译失败，请稍后重试";

/// `/name` or `/name@bot` at the start of a message, followed by whitespace or the end
static BOT_COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/([A-Za-z0-9_]+)(?:@([A-Za-z0-9_]+))?(?:\s|$)").expect("command pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    On,
    Off,
}

/// What an inbound text turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Incoming<'a> {
    Command(Command),
    /// A command we don't handle, or one addressed to another bot
    OtherCommand,
    Text(&'a str),
}

/// Split commands from plain text. A command name is ASCII letters, digits and
/// underscores, matched case-insensitively, with an optional `@botname` suffix.
/// Anything else starting with `/` is ordinary text.
pub fn classify_incoming<'a>(text: &'a str, bot_username: Option<&str>) -> Incoming<'a> {
    let text = text.trim();
    let Some(caps) = BOT_COMMAND.captures(text) else {
        return Incoming::Text(text);
    };
    let name = caps.get(1).map_or("", |m| m.as_str());
    let target = caps.get(2).map(|m| m.as_str());

    if let (Some(target), Some(own)) = (target, bot_username) {
        if !target.eq_ignore_ascii_case(own) {
            return Incoming::OtherCommand;
        }
    }

    match name.to_lowercase().as_str() {
        "help" => Incoming::Command(Command::Help),
        "on" => Incoming::Command(Command::On),
        "off" => Incoming::Command(Command::Off),
        _ => Incoming::OtherCommand,
    }
}

/// Route one update: commands toggle state, text in enabled chats is translated
pub async fn handle_update(state: &AppState, update: Update) -> anyhow::Result<()> {
    let Some(message) = update.message else {
        debug!("Skipping update {} without a message", update.update_id);
        return Ok(());
    };
    let Some(text) = message.text.as_deref() else {
        debug!("Skipping non-text message {}", message.message_id);
        return Ok(());
    };
    let chat_id = message.chat.id;

    match classify_incoming(text, state.bot_username.as_deref()) {
        Incoming::Command(command) => handle_command(state, chat_id, command).await,
        Incoming::OtherCommand => {
            debug!("Ignoring unhandled command in chat {}", chat_id);
            Ok(())
        }
        Incoming::Text(text) => handle_text(state, chat_id, text).await,
    }
}

async fn handle_command(state: &AppState, chat_id: ChatId, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Help => {
            state
                .sender
                .send_message(chat_id, HELP_TEXT, Some(ParseMode::Html))
                .await?;
        }
        Command::On => {
            state.chat_states.set(chat_id, true);
            info!("Translation enabled for chat {}", chat_id);
            state.sender.send_message(chat_id, ENABLED_TEXT, None).await?;
        }
        Command::Off => {
            state.chat_states.set(chat_id, false);
            info!("Translation disabled for chat {}", chat_id);
            state.sender.send_message(chat_id, DISABLED_TEXT, None).await?;
        }
    }
    Ok(())
}

async fn handle_text(state: &AppState, chat_id: ChatId, text: &str) -> anyhow::Result<()> {
    if !state.chat_states.get(chat_id) || text.is_empty() {
        return Ok(());
    }

    let direction = Direction::detect(text);
    let request = TranslationRequest {
        text: text.to_string(),
        source_lang: direction.source,
        target_lang: direction.target,
    };

    // Translated text goes out without a parse mode so markup in it is sent literally
    match state.translator.translate(&request).await {
        Ok(result) => {
            state.sender.send_message(chat_id, &result.text, None).await?;
        }
        Err(e) => {
            warn!("Sending failure notice to chat {}: {}", chat_id, e);
            state.sender.send_message(chat_id, FAILURE_TEXT, None).await?;
        }
    }
    Ok(())
}
