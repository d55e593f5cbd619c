pub mod protocol;
#[cfg(test)]
mod test;

pub use protocol::{
    AttachmentElement, BlockElement, ChatResponse, Envelope, FileInfo, FileInfoResponse,
    FileReference, FileUploadFinishedRequest, FileUploadFinishedResponse, FileUploadStartResponse,
    ImageBlock, PostMessage, SectionBlock, StrTimeStamp, TextObject, TextObjectType,
};

pub const ENDPOINT_POST_MESSAGE: &str = "chat.postMessage";
pub const ENDPOINT_UPDATE_MESSAGE: &str = "chat.update";
pub const ENDPOINT_GET_UPLOAD_URL: &str = "files.getUploadURLExternal";
pub const ENDPOINT_COMPLETE_UPLOAD: &str = "files.completeUploadExternal";
pub const ENDPOINT_FILE_INFO: &str = "files.info";
