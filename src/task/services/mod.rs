//! Application services for task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    CreateTaskRequest, EditTaskRequest, TaskBoard, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService,
};
