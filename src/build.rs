mod builder;
mod document;
mod fragments;
mod markdown;
mod paths;
mod pipeline;
mod post;
mod render;
mod source;
mod tags;
mod write;

pub use builder::Builder;
