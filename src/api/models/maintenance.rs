use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Completed,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceTask {
    pub task: String,
    pub date: String,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceSchedule {
    pub last_cleaning: String,
    pub next_cleaning: String,
    pub recent_maintenance: Vec<MaintenanceTask>,
    pub upcoming_tasks: Vec<MaintenanceTask>,
}

fn task(task: &str, date: &str, status: TaskStatus) -> MaintenanceTask {
    MaintenanceTask {
        task: task.to_string(),
        date: date.to_string(),
        status,
    }
}

/// Fixed schedule shown by the dashboard until maintenance records exist.
pub fn mock_schedule() -> MaintenanceSchedule {
    MaintenanceSchedule {
        last_cleaning: "15 May 2023, 10:30 AM".to_string(),
        next_cleaning: "15 June 2023, 10:00 AM".to_string(),
        recent_maintenance: vec![
            task("Inverter 3 Repair", "10 May 2023, 2:15 PM", TaskStatus::Completed),
            task("String 2 Inspection", "5 May 2023, 11:45 AM", TaskStatus::Completed),
        ],
        upcoming_tasks: vec![
            task("MPPT Unit Check", "20 May 2023, 9:00 AM", TaskStatus::Pending),
            task("Wiring Inspection", "25 May 2023, 10:30 AM", TaskStatus::Pending),
        ],
    }
}
