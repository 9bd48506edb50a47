//! Payload constructors for the activity-stream shaped content trxs that feed
//! apps exchange over a group: posts, replies, likes, profiles and the app
//! config presets a freshly created group usually wants. The results are
//! plain JSON values suitable for [crate::FullNode::post_content].

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    data::{AppConfigUpdate, ConfigAction},
    error::FullNodeError,
};

/// The chain rejects content trxs whose images exceed this total size
pub const IMAGE_MAX_TOTAL_BYTES: usize = 200 * 1024;

/// Feed apps render at most this many images per post
pub const IMAGE_MAX_COUNT: usize = 4;

/// One image attachment. The name and media type are optional; missing names
/// are generated and missing media types sniffed from the content bytes.
#[derive(Debug, Clone)]
pub struct MediaInput {
    pub name: Option<String>,
    pub media_type: Option<String>,
    pub content: Vec<u8>,
}

impl MediaInput {
    pub fn new(content: Vec<u8>) -> Self {
        MediaInput {
            name: None,
            media_type: None,
            content,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn typed(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    fn resolved_media_type(&self) -> String {
        self.media_type
            .clone()
            .or_else(|| sniff_media_type(&self.content).map(String::from))
            .unwrap_or_else(|| "application/octet-stream".into())
    }

    fn resolved_name(&self, media_type: &str) -> String {
        self.name.clone().unwrap_or_else(|| {
            format!(
                "{}-{}.{}",
                Uuid::new_v4(),
                Utc::now().format("%Y-%m-%d"),
                extension_for(media_type)
            )
        })
    }
}

fn sniff_media_type(content: &[u8]) -> Option<&'static str> {
    if content.starts_with(&[0x89, b'P', b'N', b'G']) {
        Some("image/png")
    } else if content.starts_with(&[0xff, 0xd8, 0xff]) {
        Some("image/jpeg")
    } else if content.starts_with(b"GIF8") {
        Some("image/gif")
    } else if content.starts_with(b"RIFF") && content.get(8..12) == Some(b"WEBP") {
        Some("image/webp")
    } else {
        None
    }
}

fn extension_for(media_type: &str) -> &str {
    media_type.strip_prefix("image/").unwrap_or("bin")
}

/// Render image attachments into the `{name, mediaType, content}` objects the
/// content schema expects. Anything past [IMAGE_MAX_COUNT] images is dropped;
/// payloads over the chain's total size limit are refused since a client
/// cannot recompress them on the node's behalf.
fn pack_images(images: &[MediaInput]) -> Result<Vec<Value>, FullNodeError> {
    let images = &images[..images.len().min(IMAGE_MAX_COUNT)];

    let total_bytes: usize = images.iter().map(|image| image.content.len()).sum();
    if total_bytes > IMAGE_MAX_TOTAL_BYTES {
        return Err(FullNodeError::ParamValue(format!(
            "images total {total_bytes} bytes, more than the {IMAGE_MAX_TOTAL_BYTES} the chain accepts"
        )));
    }

    Ok(images
        .iter()
        .map(|image| {
            let media_type = image.resolved_media_type();
            json!({
                "name": image.resolved_name(&media_type),
                "mediaType": media_type,
                "content": STANDARD.encode(&image.content),
            })
        })
        .collect())
}

fn note_object(
    content: &str,
    images: &[MediaInput],
    name: Option<&str>,
    post_id: Option<&str>,
) -> Result<Value, FullNodeError> {
    if content.is_empty() {
        return Err(FullNodeError::ParamValue("content is empty".into()));
    }

    let mut object = json!({
        "type": "Note",
        "content": content,
    });

    if !images.is_empty() {
        object["image"] = Value::Array(pack_images(images)?);
    }

    if let Some(name) = name {
        object["name"] = json!(name);
    }

    object["id"] = json!(post_id
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string()));

    Ok(object)
}

/// A new post. A fresh UUID is assigned when no `post_id` is given.
pub fn new_post(
    content: &str,
    images: &[MediaInput],
    post_id: Option<&str>,
    name: Option<&str>,
) -> Result<Value, FullNodeError> {
    Ok(json!({
        "type": "Create",
        "object": note_object(content, images, name, post_id)?,
    }))
}

pub fn del_post(post_id: &str) -> Value {
    json!({ "type": "Delete", "object": { "type": "Note", "id": post_id } })
}

/// Replace the body of an existing post
pub fn edit_post(
    post_id: &str,
    content: &str,
    images: &[MediaInput],
    name: Option<&str>,
) -> Result<Value, FullNodeError> {
    let mut result = note_object(content, images, name, None)?;

    if let Some(object) = result.as_object_mut() {
        object.remove("id");
    }

    Ok(json!({
        "type": "Update",
        "object": { "type": "Note", "id": post_id },
        "result": result,
    }))
}

/// A comment on another post
pub fn reply(
    content: &str,
    images: &[MediaInput],
    reply_id: &str,
    post_id: Option<&str>,
    name: Option<&str>,
) -> Result<Value, FullNodeError> {
    let mut object = note_object(content, images, name, post_id)?;
    object["inreplyto"] = json!({ "type": "Note", "id": reply_id });

    Ok(json!({ "type": "Create", "object": object }))
}

pub fn like(post_id: &str) -> Value {
    json!({ "type": "Like", "object": { "type": "Note", "id": post_id } })
}

pub fn undo_like(post_id: &str) -> Value {
    json!({ "type": "Undo", "object": like(post_id) })
}

pub fn dislike(post_id: &str) -> Value {
    json!({ "type": "Dislike", "object": { "type": "Note", "id": post_id } })
}

pub fn undo_dislike(post_id: &str) -> Value {
    json!({ "type": "Undo", "object": dislike(post_id) })
}

/// Update the profile describing `addr`; at least one of a display name or an
/// avatar is required
pub fn profile(
    name: Option<&str>,
    avatar: Option<&MediaInput>,
    addr: &str,
) -> Result<Value, FullNodeError> {
    if name.is_none() && avatar.is_none() {
        return Err(FullNodeError::ParamValue("name and avatar are empty".into()));
    }

    let mut object = json!({
        "type": "Profile",
        "describes": { "type": "Person", "id": addr },
    });

    if let Some(name) = name {
        object["name"] = json!(name);
    }

    if let Some(avatar) = avatar {
        object["image"] = Value::Array(pack_images(std::slice::from_ref(avatar))?);
    }

    Ok(json!({ "type": "Create", "object": object }))
}

pub fn follow(addr: &str) -> Value {
    json!({ "type": "Follow", "object": { "type": "Person", "id": addr } })
}

pub fn unfollow(addr: &str) -> Value {
    json!({ "type": "Undo", "object": follow(addr) })
}

pub fn block(addr: &str) -> Value {
    json!({ "type": "Block", "object": { "type": "Person", "id": addr } })
}

pub fn unblock(addr: &str) -> Value {
    json!({ "type": "Undo", "object": block(addr) })
}

/// Initialize the group icon app config entry; the icon is embedded as a
/// `data:` URI
pub fn group_icon(icon: &MediaInput) -> Result<AppConfigUpdate, FullNodeError> {
    if icon.content.len() > IMAGE_MAX_TOTAL_BYTES {
        return Err(FullNodeError::ParamValue(format!(
            "icon is {} bytes, more than the {IMAGE_MAX_TOTAL_BYTES} the chain accepts",
            icon.content.len()
        )));
    }

    let media_type = icon.resolved_media_type();
    let value = format!("data:{};base64,{}", media_type, STANDARD.encode(&icon.content));

    Ok(AppConfigUpdate {
        name: "group_icon".into(),
        kind: "string".into(),
        value,
        action: ConfigAction::Add,
        memo: Some("init group icon".into()),
    })
}

/// Initialize the group description app config entry
pub fn group_desc(desc: &str) -> AppConfigUpdate {
    AppConfigUpdate {
        name: "group_desc".into(),
        kind: "string".into(),
        value: desc.to_owned(),
        action: ConfigAction::Add,
        memo: Some("init group desc".into()),
    }
}

/// Initialize the group announcement app config entry
pub fn group_announcement(announcement: &str) -> AppConfigUpdate {
    AppConfigUpdate {
        name: "group_announcement".into(),
        kind: "string".into(),
        value: announcement.to_owned(),
        action: ConfigAction::Add,
        memo: Some("init group announcement".into()),
    }
}

/// Initialize the group default permission app config entry; the node only
/// understands `WRITE` and `READ`
pub fn group_default_permission(permission: &str) -> Result<AppConfigUpdate, FullNodeError> {
    let permission = permission.to_uppercase();

    if permission != "WRITE" && permission != "READ" {
        return Err(FullNodeError::ParamValue(
            "default_permission must be one of WRITE, READ".into(),
        ));
    }

    Ok(AppConfigUpdate {
        name: "group_default_permission".into(),
        kind: "string".into(),
        value: permission,
        action: ConfigAction::Add,
        memo: Some("init group default permission".into()),
    })
}
