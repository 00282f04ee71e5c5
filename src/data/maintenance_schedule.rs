//! Plantilla de mantenimiento por defecto
//!
//! Cada vehículo nuevo recibe una tarea por cada entrada de esta lista.

use crate::models::{Interval, MaintenanceCategory, MaintenanceScheduleItem, Priority};

use MaintenanceCategory::*;

pub const DEFAULT_MAINTENANCE_SCHEDULE: &[MaintenanceScheduleItem] = &[
    MaintenanceScheduleItem {
        title: "Oil Change",
        description: "Change engine oil and oil filter",
        category: OilChange,
        interval: Interval::Both { miles: 5000, months: 6 },
        priority: Priority::High,
    },
    MaintenanceScheduleItem {
        title: "Tire Rotation",
        description: "Rotate tires to promote even wear",
        category: TireRotation,
        interval: Interval::Mileage { miles: 6000 },
        priority: Priority::Medium,
    },
    MaintenanceScheduleItem {
        title: "Air Filter Replacement",
        description: "Replace engine air filter",
        category: FilterReplacement,
        interval: Interval::Mileage { miles: 15000 },
        priority: Priority::Low,
    },
    MaintenanceScheduleItem {
        title: "Cabin Air Filter Replacement",
        description: "Replace cabin air filter for clean interior air",
        category: FilterReplacement,
        interval: Interval::Mileage { miles: 15000 },
        priority: Priority::Low,
    },
    MaintenanceScheduleItem {
        title: "Brake Inspection",
        description: "Inspect brake pads, rotors, and brake fluid",
        category: BrakeInspection,
        interval: Interval::Mileage { miles: 12000 },
        priority: Priority::High,
    },
    MaintenanceScheduleItem {
        title: "Battery Check",
        description: "Test battery health and clean terminals",
        category: Battery,
        interval: Interval::Both { miles: 12000, months: 12 },
        priority: Priority::Medium,
    },
    MaintenanceScheduleItem {
        title: "Coolant Flush",
        description: "Flush and replace engine coolant",
        category: FluidCheck,
        interval: Interval::Both { miles: 30000, months: 24 },
        priority: Priority::Medium,
    },
    MaintenanceScheduleItem {
        title: "Transmission Fluid Change",
        description: "Change transmission fluid and filter",
        category: FluidCheck,
        interval: Interval::Mileage { miles: 40000 },
        priority: Priority::Medium,
    },
    MaintenanceScheduleItem {
        title: "Spark Plug Replacement",
        description: "Replace spark plugs",
        category: Other,
        interval: Interval::Mileage { miles: 30000 },
        priority: Priority::Medium,
    },
    MaintenanceScheduleItem {
        title: "Serpentine Belt Inspection",
        description: "Inspect serpentine belt for wear and cracks",
        category: Inspection,
        interval: Interval::Mileage { miles: 25000 },
        priority: Priority::Medium,
    },
    MaintenanceScheduleItem {
        title: "Wiper Blade Replacement",
        description: "Replace windshield wiper blades",
        category: Other,
        interval: Interval::Time { months: 12 },
        priority: Priority::Low,
    },
    MaintenanceScheduleItem {
        title: "Tire Pressure Check",
        description: "Check and adjust tire pressure",
        category: Other,
        interval: Interval::Time { months: 1 },
        priority: Priority::Medium,
    },
    MaintenanceScheduleItem {
        title: "Wheel Alignment",
        description: "Check and adjust wheel alignment",
        category: Other,
        interval: Interval::Mileage { miles: 20000 },
        priority: Priority::Low,
    },
    MaintenanceScheduleItem {
        title: "Multi-Point Inspection",
        description: "Comprehensive vehicle inspection",
        category: Inspection,
        interval: Interval::Both { miles: 15000, months: 12 },
        priority: Priority::Medium,
    },
];
