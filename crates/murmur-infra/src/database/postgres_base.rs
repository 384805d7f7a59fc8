use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, DbConn, EntityTrait, IdenStatic, IntoActiveModel, Iterable,
    PrimaryKeyToColumn, PrimaryKeyTrait,
};

use murmur_core::error::RepoError;
use murmur_core::ports::BaseRepository;

/// Generic PostgreSQL repository implementation.
///
/// One instance per entity type; the per-entity repository traits are
/// implemented on type aliases of this struct.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Into<E::ActiveModel> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, entity: T) -> Result<T, RepoError> {
        let active_model: E::ActiveModel = entity.into();

        // Primary keys are generated client-side, so the key is always
        // set and ActiveModelTrait::save would only ever UPDATE. Upsert
        // on the key instead: INSERT new rows, overwrite the data
        // columns of existing ones.
        let pk_columns: Vec<E::Column> = E::PrimaryKey::iter()
            .map(PrimaryKeyToColumn::into_column)
            .collect();
        let data_columns: Vec<E::Column> = E::Column::iter()
            .filter(|col| !pk_columns.iter().any(|pk| pk.as_str() == col.as_str()))
            .collect();

        let mut on_conflict = OnConflict::columns(pk_columns);
        if data_columns.is_empty() {
            on_conflict.do_nothing();
        } else {
            on_conflict.update_columns(data_columns);
        }

        let model = E::insert(active_model)
            .on_conflict(on_conflict)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                if err_str.contains("duplicate") || err_str.contains("unique") {
                    RepoError::Constraint("Entity already exists".to_string())
                } else {
                    RepoError::Query(err_str)
                }
            })?;

        Ok(model.into())
    }

    async fn delete(&self, id: ID) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
