pub mod control_task;
