use std::io::{Result, Write};

use ferrum_utils::{serial::WriteTo, text::chat_component};

use crate::{packet_ids::play::C_SYSTEM_CHAT, packet_traits::ClientPacket};

/// Where the client renders a chat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ChatPosition {
    /// The chat box.
    Chat = 0,
    /// The chat box, ignored when the client hides player chat.
    System = 1,
    /// Above the hotbar.
    ActionBar = 2,
}

/// A chat line. `content` is already a JSON text component.
#[derive(Debug, Clone)]
pub struct CSystemChat {
    /// JSON text component
    pub content: String,
    /// Where the client shows it
    pub position: ChatPosition,
}

impl CSystemChat {
    /// Wraps plain text in a chat component. Line breaks are dropped.
    #[must_use]
    pub fn text(message: &str) -> Self {
        Self {
            content: chat_component(message),
            position: ChatPosition::Chat,
        }
    }
}

impl WriteTo for CSystemChat {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        self.content.write(writer)?;
        (self.position as u8).write(writer)
    }
}

impl ClientPacket for CSystemChat {
    const PACKET_ID: i32 = C_SYSTEM_CHAT;
}
