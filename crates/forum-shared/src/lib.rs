//! # Forum Shared
//!
//! Transfer objects exchanged across the HTTP boundary.
//! This crate has no knowledge of storage or domain rules.

pub mod dto;
pub mod response;

pub use dto::{
    CommentDto, LikeResponse, NewCommentRequest, NewPostRequest, PeriodRequest, PostDto,
    UpdatePostRequest,
};
pub use response::ErrorResponse;
