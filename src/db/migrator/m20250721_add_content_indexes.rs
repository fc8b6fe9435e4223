use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_question_papers_class_subject")
                    .table(QuestionPapers::Table)
                    .col(QuestionPapers::Class)
                    .col(QuestionPapers::Subject)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_videos_class_subject")
                    .table(Videos::Table)
                    .col(Videos::Class)
                    .col(Videos::Subject)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notes_class_subject")
                    .table(Notes::Table)
                    .col(Notes::Class)
                    .col(Notes::Subject)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_mobile")
                    .table(Users::Table)
                    .col(Users::Mobile)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_users_mobile")
                    .table(Users::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_notes_class_subject")
                    .table(Notes::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_videos_class_subject")
                    .table(Videos::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_question_papers_class_subject")
                    .table(QuestionPapers::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum QuestionPapers {
    Table,
    Class,
    Subject,
}

#[derive(DeriveIden)]
enum Videos {
    Table,
    Class,
    Subject,
}

#[derive(DeriveIden)]
enum Notes {
    Table,
    Class,
    Subject,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Mobile,
}
