//! SeaORM entities for database tables

/// Retroactive pay configuration table
pub mod config {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "retro_pay_configs")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        /// Owning tenant (company)
        pub tenant_id: Uuid,

        pub name: String,

        pub pay_group_id: Uuid,

        pub effective_start_date: Date,

        pub effective_end_date: Date,

        /// "percentage" | "fixed_amount"
        pub increase_type: String,

        #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
        pub increase_value: Decimal,

        /// "draft" | "approved"
        pub status: String,

        pub created_by: Uuid,

        pub approved_by: Option<Uuid>,

        pub approved_at: Option<DateTimeUtc>,

        pub created_at: DateTimeUtc,

        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// One-to-many relationship with generated calculations
        #[sea_orm(has_many = "super::calculation::Entity")]
        Calculations,
    }

    impl Related<super::calculation::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Calculations.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Historical pay period entries, written by payroll runs
pub mod pay_entry {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "pay_period_entries")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        pub tenant_id: Uuid,

        pub pay_group_id: Uuid,

        pub employee_id: Uuid,

        pub employee_first_name: Option<String>,

        pub employee_last_name: Option<String>,

        /// "active" | "terminated" | "on_leave"
        pub employee_status: String,

        pub pay_year: i32,

        pub pay_cycle_number: i32,

        pub period_start: Date,

        pub period_end: Date,

        pub pay_element: String,

        #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
        pub amount: Decimal,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Generated calculation rows
pub mod calculation {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "retro_pay_calculations")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        pub tenant_id: Uuid,

        pub config_id: Uuid,

        pub employee_id: Uuid,

        pub employee_first_name: Option<String>,

        pub employee_last_name: Option<String>,

        pub employee_status: String,

        pub pay_year: i32,

        pub pay_cycle_number: i32,

        pub pay_element: String,

        #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
        pub original_amount: Decimal,

        pub increase_type: String,

        #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
        pub increase_value: Decimal,

        #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
        pub adjustment_amount: Decimal,

        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// Foreign key to retro_pay_configs
        #[sea_orm(
            belongs_to = "super::config::Entity",
            from = "Column::ConfigId",
            to = "super::config::Column::Id"
        )]
        Config,
    }

    impl Related<super::config::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Config.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
