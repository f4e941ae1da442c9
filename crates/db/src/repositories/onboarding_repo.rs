//! Transactional writer for the onboarding import.
//!
//! Takes the already-filtered plan from `pathos_core::onboarding` and
//! materializes it: one project per planned item, an initial "Next
//! Steps" milestone, one task per step, and an optional note entry.
//! Passions the user has not joined are skipped, not fatal.

use pathos_core::onboarding::PlannedProject;
use pathos_core::types::DbId;
use serde::Serialize;
use sqlx::PgPool;

/// Counts reported back to the onboarding caller.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct ImportSummary {
    pub projects_created: u32,
    pub tasks_created: u32,
    pub passions_skipped: u32,
}

pub struct OnboardingRepo;

impl OnboardingRepo {
    /// Run the whole import in one transaction.
    pub async fn import(
        pool: &PgPool,
        user_id: DbId,
        plans: &[(DbId, Vec<PlannedProject>)],
    ) -> Result<ImportSummary, sqlx::Error> {
        let mut summary = ImportSummary::default();
        let mut tx = pool.begin().await?;

        for (passion_id, projects) in plans {
            let member: Option<DbId> = sqlx::query_scalar(
                "SELECT id FROM user_passions WHERE user_id = $1 AND passion_id = $2",
            )
            .bind(user_id)
            .bind(passion_id)
            .fetch_optional(&mut *tx)
            .await?;
            if member.is_none() {
                summary.passions_skipped += 1;
                continue;
            }

            for plan in projects {
                let project_id: DbId = sqlx::query_scalar(
                    "INSERT INTO projects (user_id, passion_id, title, description, status, stage)
                     VALUES ($1, $2, $3, $4, 'active', 'planning')
                     RETURNING id",
                )
                .bind(user_id)
                .bind(passion_id)
                .bind(&plan.title)
                .bind(&plan.description)
                .fetch_one(&mut *tx)
                .await?;
                summary.projects_created += 1;

                let milestone_id: DbId = sqlx::query_scalar(
                    "INSERT INTO milestones (user_id, project_id, title, description, status)
                     VALUES ($1, $2, 'Next Steps', $3, 'planned')
                     RETURNING id",
                )
                .bind(user_id)
                .bind(project_id)
                .bind(format!("Initial steps for {}", plan.title))
                .fetch_one(&mut *tx)
                .await?;

                for (idx, step) in plan.steps.iter().enumerate() {
                    sqlx::query(
                        "INSERT INTO tasks (user_id, project_id, milestone_id, title, sort_order)
                         VALUES ($1, $2, $3, $4, $5)",
                    )
                    .bind(user_id)
                    .bind(project_id)
                    .bind(milestone_id)
                    .bind(step)
                    .bind(idx as i32)
                    .execute(&mut *tx)
                    .await?;
                    summary.tasks_created += 1;
                }

                if let Some(note) = &plan.note {
                    sqlx::query(
                        "INSERT INTO entries
                            (user_id, project_id, title, content, entry_type, published_at)
                         VALUES ($1, $2, 'Project Notes', $3, 'note', NOW())",
                    )
                    .bind(user_id)
                    .bind(project_id)
                    .bind(note)
                    .execute(&mut *tx)
                    .await?;
                }
            }
        }

        tx.commit().await?;
        tracing::info!(
            user_id,
            projects = summary.projects_created,
            tasks = summary.tasks_created,
            skipped = summary.passions_skipped,
            "onboarding import finished"
        );
        Ok(summary)
    }
}
