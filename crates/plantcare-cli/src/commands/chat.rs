//! Commands that drive the persisted chat session.

use crate::bootstrap::{AppContext, image_ref};
use anyhow::{Result, bail};
use plantcare_core::message::{Message, MessageKind};
use plantcare_core::session::{RejectReason, SendOutcome, SessionManager};
use std::path::Path;

pub async fn send_text(ctx: &AppContext, text: &str) -> Result<()> {
    let session = ctx.session().await?;
    let outcome = session.send_text(text).await;
    finish(&session, outcome).await
}

pub async fn send_image(ctx: &AppContext, path: &Path, caption: Option<&str>) -> Result<()> {
    let image = image_ref(path)?;
    let session = ctx.session().await?;
    let outcome = session.send_image(&image, caption).await;
    finish(&session, outcome).await
}

pub async fn history(ctx: &AppContext) -> Result<()> {
    let session = ctx.session().await?;
    let transcript = session.snapshot().await;
    let rendered: Vec<String> = transcript.iter().map(render_message).collect();
    println!("{}", rendered.join("\n\n"));
    Ok(())
}

pub async fn clear(ctx: &AppContext) -> Result<()> {
    let session = ctx.session().await?;
    session.clear().await;
    session.flush().await;
    println!("{}", render_message(&session.snapshot().await[0]));
    Ok(())
}

/// Prints the reply of a completed send and waits for it to be persisted.
async fn finish(session: &SessionManager, outcome: SendOutcome) -> Result<()> {
    session.flush().await;
    match outcome {
        SendOutcome::Completed(_) => {
            if let Some(reply) = session.snapshot().await.last() {
                println!("{}", render_message(reply));
            }
            Ok(())
        }
        SendOutcome::Discarded => Ok(()),
        SendOutcome::Rejected(RejectReason::EmptyInput) => bail!("Nothing to send: the message is empty"),
        SendOutcome::Rejected(RejectReason::MissingImage) => bail!("Nothing to send: no image given"),
        SendOutcome::Rejected(RejectReason::Busy) => bail!("Another message is still being sent"),
    }
}

fn render_message(message: &Message) -> String {
    let speaker = if message.is_user() { "Tú" } else { "PlantCare" };
    match (message.kind(), message.image_ref()) {
        (MessageKind::Image, Some(image)) => {
            format!("{}:\n📷 {}\n{}", speaker, image, message.body())
        }
        _ => format!("{}:\n{}", speaker, message.body()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text_and_image() {
        assert_eq!(
            render_message(&Message::assistant_text("Riega cada 5 días.")),
            "PlantCare:\nRiega cada 5 días."
        );
        assert_eq!(
            render_message(&Message::user_image("Sin descripción", "file:///tmp/a.jpg")),
            "Tú:\n📷 file:///tmp/a.jpg\nSin descripción"
        );
    }
}
