//! Core types shared by the catalog and the backend client

mod tool;
mod agent;

pub use tool::{Tool, ToolCategory, ToolArchetype, ToolMetadata, ParseToolEnumError};
pub use agent::{
    AgentList, ToolLookup, ToolRequest, GenerationSettings, SettingsOverride, ProcessPayload,
    AgentCallResult, FileUpload, FileCallResult, GENERIC_FAILURE_MESSAGE,
};
