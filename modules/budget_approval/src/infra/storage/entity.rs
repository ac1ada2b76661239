//! SeaORM entities for database tables

/// Budget plan table
pub mod plan {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "position_budget_plans")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        pub tenant_id: Uuid,

        pub name: String,

        pub fiscal_year: i32,

        #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
        pub total_amount: Decimal,

        /// "draft" | "pending" | "approved" | "rejected"
        pub status: String,

        pub created_by: Uuid,

        pub created_at: DateTimeUtc,

        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::level::Entity")]
        Levels,
    }

    impl Related<super::level::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Levels.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Approval chain table; one row per level
pub mod level {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "position_budget_approvals")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        pub tenant_id: Uuid,

        pub plan_id: Uuid,

        pub level_order: i32,

        pub level_name: String,

        /// "pending" | "approved" | "rejected" | "skipped"
        pub status: String,

        pub approver_id: Option<Uuid>,

        pub submitted_at: Option<DateTimeUtc>,

        pub decided_at: Option<DateTimeUtc>,

        #[sea_orm(column_type = "Text", nullable)]
        pub comments: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::plan::Entity",
            from = "Column::PlanId",
            to = "super::plan::Column::Id"
        )]
        Plan,
    }

    impl Related<super::plan::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Plan.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
