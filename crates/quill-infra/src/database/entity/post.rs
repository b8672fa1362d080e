//! Post entity for SeaORM.

use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::{PostDocument, PostStatus};
use quill_core::error::RepoError;
use quill_core::pipeline::instant::{format_instant, parse_instant};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: Option<String>,
    pub status: String,
    pub published_at: Option<DateTimeWithTimeZone>,
    pub hero_image_id: Option<Uuid>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub body: Option<Json>,
    pub author_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Author,
    #[sea_orm(
        belongs_to = "super::media::Entity",
        from = "Column::HeroImageId",
        to = "super::media::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    HeroImage,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::media::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HeroImage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to the stored document.
impl TryFrom<Model> for PostDocument {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let status = model
            .status
            .parse::<PostStatus>()
            .map_err(|reason| RepoError::InvalidField {
                field: "status",
                reason,
            })?;

        Ok(Self {
            id: model.id,
            title: model.title,
            slug: model.slug,
            status,
            published_at: model
                .published_at
                .map(|at| format_instant(at.with_timezone(&Utc))),
            hero_image: model.hero_image_id,
            body: model.body,
            author: model.author_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }
}

/// Conversion from the stored document to SeaORM ActiveModel.
impl TryFrom<PostDocument> for ActiveModel {
    type Error = RepoError;

    fn try_from(doc: PostDocument) -> Result<Self, Self::Error> {
        let published_at = doc
            .published_at
            .as_deref()
            .map(|raw| {
                parse_instant(raw).ok_or_else(|| RepoError::InvalidField {
                    field: "publishedAt",
                    reason: format!("`{raw}` is not a valid instant"),
                })
            })
            .transpose()?;

        Ok(Self {
            id: Set(doc.id),
            title: Set(doc.title),
            slug: Set(doc.slug),
            status: Set(doc.status.as_str().to_string()),
            published_at: Set(published_at.map(Into::into)),
            hero_image_id: Set(doc.hero_image),
            body: Set(doc.body),
            author_id: Set(doc.author),
            created_at: Set(doc.created_at.into()),
            updated_at: Set(doc.updated_at.into()),
        })
    }
}
