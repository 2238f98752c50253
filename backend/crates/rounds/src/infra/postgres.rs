//! PostgreSQL Repository Implementations

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use kernel::id::{
    AssignedRoundId, CheckpointId, CheckpointScanId, CompletedRoundId, RoundTypeId, RouteId,
    UserId, UserTypeId,
};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::entity::{
    assigned_round::AssignedRound,
    checkpoint::{CheckpointLocation, RouteCheckpoint},
    completed_round::{CheckpointScan, CompletedRound, NewCompletedRound},
    round_type::RoundType,
    user::{User, UserType},
};
use crate::domain::repository::{
    AssignmentRepository, CatalogRepository, CompletedRoundRepository, UserRepository,
};
use crate::domain::value_object::{
    coordinate::{Coordinate, decimal_to_f64},
    email::Email,
    schedule_window::ScheduleWindow,
};
use crate::error::RoundsResult;

/// PostgreSQL-backed rounds repository
#[derive(Clone)]
pub struct PgRoundsRepository {
    pool: PgPool,
}

impl PgRoundsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Round-trip check used by the health endpoint
    pub async fn ping(&self) -> RoundsResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert_round(
        tx: &mut Transaction<'static, Postgres>,
        round: &NewCompletedRound,
    ) -> RoundsResult<CompletedRoundId> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO rondas_usuarios (
                id_usuario,
                id_ronda_asignada,
                fecha,
                hora_inicio,
                hora_final,
                sincronizada
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id_ronda_usuario
            "#,
        )
        .bind(round.user_id.value())
        .bind(round.assigned_round_id.value())
        .bind(round.date)
        .bind(round.started_at)
        .bind(round.finished_at)
        .bind(flag(NewCompletedRound::SYNCHRONIZED))
        .fetch_one(&mut **tx)
        .await?;

        let id = CompletedRoundId::new(id);

        // One statement per scan keeps serial ids in submission order
        for scan in &round.scans {
            sqlx::query(
                r#"
                INSERT INTO coordenadas_usuarios (
                    id_ronda_usuario,
                    hora_actual,
                    latitud_actual,
                    longitud_actual,
                    codigo_qr,
                    verificador
                ) VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(id.value())
            .bind(scan.scanned_at)
            .bind(scan.latitude.map(Coordinate::into_db))
            .bind(scan.longitude.map(Coordinate::into_db))
            .bind(scan.qr_code.as_deref())
            .bind(flag(scan.verified))
            .execute(&mut **tx)
            .await?;
        }

        Ok(id)
    }
}

/// 0/1 flag columns
fn flag(value: bool) -> i16 {
    i16::from(value)
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgRoundsRepository {
    async fn find_by_email(&self, email: &Email) -> RoundsResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id_usuario,
                id_tipo,
                nombre,
                contrasena,
                correo
            FROM usuarios
            WHERE correo = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_user_type(&self, type_id: UserTypeId) -> RoundsResult<Option<UserType>> {
        let row = sqlx::query_as::<_, UserTypeRow>(
            "SELECT tipo_id, nombre_tipo_usuario FROM tipos_de_usuarios WHERE tipo_id = $1",
        )
        .bind(type_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| UserType {
            id: UserTypeId::new(r.tipo_id),
            name: r.nombre_tipo_usuario,
        }))
    }
}

// ============================================================================
// Catalog Repository Implementation
// ============================================================================

impl CatalogRepository for PgRoundsRepository {
    async fn list_round_types(&self) -> RoundsResult<Vec<RoundType>> {
        let rows = sqlx::query_as::<_, RoundTypeRow>(
            "SELECT id_tipo, nombre_tipo_ronda FROM tipo_ronda ORDER BY id_tipo",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| RoundType {
                id: RoundTypeId::new(r.id_tipo),
                name: r.nombre_tipo_ronda,
            })
            .collect())
    }

    async fn list_checkpoint_locations(&self) -> RoundsResult<Vec<CheckpointLocation>> {
        let rows = sqlx::query_as::<_, CheckpointLocationRow>(
            r#"
            SELECT
                id_coordenada_admin,
                latitud,
                longitud,
                codigo_qr,
                nombre_coordenada,
                fecha_creacion
            FROM coordenadas_admin
            ORDER BY id_coordenada_admin
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CheckpointLocationRow::into_entity).collect())
    }
}

// ============================================================================
// Assignment Repository Implementation
// ============================================================================

impl AssignmentRepository for PgRoundsRepository {
    async fn find_assigned_for_user(
        &self,
        user_id: UserId,
        window: &ScheduleWindow,
    ) -> RoundsResult<Vec<AssignedRound>> {
        let rows = sqlx::query_as::<_, AssignedRoundRow>(
            r#"
            SELECT
                id_ronda_asignada,
                id_tipo,
                id_usuario,
                id_ruta,
                fecha_de_ejecucion,
                hora_de_ejecucion,
                distancia_permitida
            FROM ronda_asignada
            WHERE id_usuario = $1
              AND fecha_de_ejecucion BETWEEN $2 AND $3
            ORDER BY fecha_de_ejecucion, hora_de_ejecucion, id_ronda_asignada
            "#,
        )
        .bind(user_id.value())
        .bind(window.start())
        .bind(window.end())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AssignedRoundRow::into_entity).collect())
    }

    async fn find_route_checkpoints(&self, route_ids: &[RouteId]) -> RoundsResult<Vec<RouteCheckpoint>> {
        let ids: Vec<i32> = route_ids.iter().map(|id| id.value()).collect();

        let rows = sqlx::query_as::<_, RouteCheckpointRow>(
            r#"
            SELECT id_ruta, id_coordenada_admin, orden
            FROM ruta_coordenadas
            WHERE id_ruta = ANY($1)
            ORDER BY id_ruta, orden
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| RouteCheckpoint {
                route_id: RouteId::new(r.id_ruta),
                checkpoint_id: CheckpointId::new(r.id_coordenada_admin),
                order: r.orden,
            })
            .collect())
    }
}

// ============================================================================
// Completed Round Repository Implementation
// ============================================================================

impl CompletedRoundRepository for PgRoundsRepository {
    async fn create(&self, round: &NewCompletedRound) -> RoundsResult<CompletedRoundId> {
        let mut tx = self.pool.begin().await?;

        match Self::insert_round(&mut tx, round).await {
            Ok(id) => {
                tx.commit().await?;
                Ok(id)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(error = %rollback_err, "Failed to roll back round submission");
                }
                Err(e)
            }
        }
    }

    async fn find_by_id(&self, id: CompletedRoundId) -> RoundsResult<Option<CompletedRound>> {
        let row = sqlx::query_as::<_, CompletedRoundRow>(
            r#"
            SELECT
                id_ronda_usuario,
                id_usuario,
                id_ronda_asignada,
                fecha,
                hora_inicio,
                hora_final,
                sincronizada
            FROM rondas_usuarios
            WHERE id_ronda_usuario = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let scans = sqlx::query_as::<_, CheckpointScanRow>(
            r#"
            SELECT
                id,
                id_ronda_usuario,
                hora_actual,
                latitud_actual,
                longitud_actual,
                codigo_qr,
                verificador
            FROM coordenadas_usuarios
            WHERE id_ronda_usuario = $1
            ORDER BY id
            "#,
        )
        .bind(id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(row.into_entity(
            scans.into_iter().map(CheckpointScanRow::into_entity).collect(),
        )))
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id_usuario: i32,
    id_tipo: i32,
    nombre: String,
    contrasena: String,
    correo: Option<String>,
}

impl UserRow {
    fn into_user(self) -> User {
        User::from_db(
            self.id_usuario,
            self.id_tipo,
            self.nombre,
            self.contrasena,
            self.correo,
        )
    }
}

#[derive(sqlx::FromRow)]
struct UserTypeRow {
    tipo_id: i32,
    nombre_tipo_usuario: String,
}

#[derive(sqlx::FromRow)]
struct RoundTypeRow {
    id_tipo: i32,
    nombre_tipo_ronda: String,
}

#[derive(sqlx::FromRow)]
struct CheckpointLocationRow {
    id_coordenada_admin: i32,
    latitud: Option<Decimal>,
    longitud: Option<Decimal>,
    codigo_qr: Option<String>,
    nombre_coordenada: String,
    fecha_creacion: NaiveDateTime,
}

impl CheckpointLocationRow {
    fn into_entity(self) -> CheckpointLocation {
        CheckpointLocation {
            id: CheckpointId::new(self.id_coordenada_admin),
            latitude: decimal_to_f64(self.latitud),
            longitude: decimal_to_f64(self.longitud),
            qr_code: self.codigo_qr,
            name: self.nombre_coordenada,
            created_at: self.fecha_creacion,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RouteCheckpointRow {
    id_ruta: i32,
    id_coordenada_admin: i32,
    orden: i32,
}

#[derive(sqlx::FromRow)]
struct AssignedRoundRow {
    id_ronda_asignada: i32,
    id_tipo: i32,
    id_usuario: i32,
    id_ruta: i32,
    fecha_de_ejecucion: NaiveDate,
    hora_de_ejecucion: NaiveTime,
    distancia_permitida: Option<Decimal>,
}

impl AssignedRoundRow {
    fn into_entity(self) -> AssignedRound {
        AssignedRound {
            id: AssignedRoundId::new(self.id_ronda_asignada),
            round_type_id: RoundTypeId::new(self.id_tipo),
            user_id: UserId::new(self.id_usuario),
            route_id: RouteId::new(self.id_ruta),
            scheduled_date: self.fecha_de_ejecucion,
            scheduled_time: self.hora_de_ejecucion,
            allowed_distance: decimal_to_f64(self.distancia_permitida),
        }
    }
}

#[derive(sqlx::FromRow)]
struct CompletedRoundRow {
    id_ronda_usuario: i32,
    id_usuario: i32,
    id_ronda_asignada: i32,
    fecha: NaiveDate,
    hora_inicio: NaiveTime,
    hora_final: Option<NaiveTime>,
    sincronizada: i16,
}

impl CompletedRoundRow {
    fn into_entity(self, scans: Vec<CheckpointScan>) -> CompletedRound {
        CompletedRound {
            id: CompletedRoundId::new(self.id_ronda_usuario),
            user_id: UserId::new(self.id_usuario),
            assigned_round_id: AssignedRoundId::new(self.id_ronda_asignada),
            date: self.fecha,
            started_at: self.hora_inicio,
            finished_at: self.hora_final,
            synchronized: self.sincronizada != 0,
            scans,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CheckpointScanRow {
    id: i32,
    id_ronda_usuario: i32,
    hora_actual: NaiveDateTime,
    latitud_actual: Option<Decimal>,
    longitud_actual: Option<Decimal>,
    codigo_qr: Option<String>,
    verificador: i16,
}

impl CheckpointScanRow {
    fn into_entity(self) -> CheckpointScan {
        CheckpointScan {
            id: CheckpointScanId::new(self.id),
            completed_round_id: CompletedRoundId::new(self.id_ronda_usuario),
            scanned_at: self.hora_actual,
            latitude: self.latitud_actual.map(Coordinate::from_db),
            longitude: self.longitud_actual.map(Coordinate::from_db),
            qr_code: self.codigo_qr,
            verified: self.verificador != 0,
        }
    }
}

/// Run against a live server: `DATABASE_URL=postgres://... cargo test -p rounds -- --ignored`.
/// Each test gets a fresh database with the migrations applied.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::completed_round::NewCheckpointScan;
    use crate::domain::value_object::coordinate::Axis;

    async fn seed_assignment(pool: &PgPool) -> (UserId, AssignedRoundId) {
        sqlx::query("INSERT INTO tipos_de_usuarios (tipo_id, nombre_tipo_usuario) VALUES (1, 'Guardia')")
            .execute(pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO usuarios (id_usuario, id_tipo, nombre, contrasena, correo) \
             VALUES (10, 1, 'Ana Rojas', 'x', 'guardia@example.com')",
        )
        .execute(pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO tipo_ronda (id_tipo, nombre_tipo_ronda) VALUES (1, 'Nocturna')")
            .execute(pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO rutas (id_ruta, nombre_ruta) VALUES (7, 'Perimetro')")
            .execute(pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO ronda_asignada \
             (id_ronda_asignada, id_tipo, id_usuario, id_ruta, fecha_de_ejecucion, hora_de_ejecucion) \
             VALUES (104, 1, 10, 7, '2025-11-03', '07:00:00')",
        )
        .execute(pool)
        .await
        .unwrap();

        (UserId::new(10), AssignedRoundId::new(104))
    }

    fn scan(second: u32, qr_code: String) -> NewCheckpointScan {
        NewCheckpointScan {
            scanned_at: NaiveDate::from_ymd_opt(2025, 11, 3)
                .unwrap()
                .and_hms_opt(7, 20, second)
                .unwrap(),
            latitude: Coordinate::from_reported(Axis::Latitude, Some(-33.4489)).unwrap(),
            longitude: Coordinate::from_reported(Axis::Longitude, Some(-70.6693)).unwrap(),
            qr_code: Some(qr_code),
            verified: true,
        }
    }

    fn round(user_id: UserId, assigned_round_id: AssignedRoundId, scans: Vec<NewCheckpointScan>) -> NewCompletedRound {
        NewCompletedRound {
            user_id,
            assigned_round_id,
            date: NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
            started_at: NaiveTime::from_hms_opt(7, 15, 0).unwrap(),
            finished_at: NaiveTime::from_hms_opt(8, 0, 0),
            scans,
        }
    }

    async fn count(pool: &PgPool, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test(migrations = "../../../database/migrations")]
    #[ignore = "requires DATABASE_URL pointing at a Postgres server"]
    async fn test_failed_scan_rolls_back_whole_round(pool: PgPool) {
        let (user_id, assigned_round_id) = seed_assignment(&pool).await;
        let repo = PgRoundsRepository::new(pool.clone());

        // codigo_qr is VARCHAR(255)
        let submission = round(
            user_id,
            assigned_round_id,
            vec![scan(0, "QR-PORTON".to_string()), scan(30, "Q".repeat(300))],
        );

        let err = repo.create(&submission).await.unwrap_err();
        assert!(matches!(err, crate::error::RoundsError::Database(_)));

        assert_eq!(count(&pool, "rondas_usuarios").await, 0);
        assert_eq!(count(&pool, "coordenadas_usuarios").await, 0);
    }

    #[sqlx::test(migrations = "../../../database/migrations")]
    #[ignore = "requires DATABASE_URL pointing at a Postgres server"]
    async fn test_round_and_scans_stored_together(pool: PgPool) {
        let (user_id, assigned_round_id) = seed_assignment(&pool).await;
        let repo = PgRoundsRepository::new(pool.clone());

        let submission = round(
            user_id,
            assigned_round_id,
            vec![scan(0, "QR-PORTON".to_string()), scan(30, "QR-BODEGA".to_string())],
        );

        let id = repo.create(&submission).await.unwrap();

        let stored: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM coordenadas_usuarios WHERE id_ronda_usuario = $1")
                .bind(id.value())
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(stored, 2);
        assert_eq!(count(&pool, "rondas_usuarios").await, 1);

        let round = repo.find_by_id(id).await.unwrap().unwrap();
        let qr: Vec<Option<&str>> = round.scans.iter().map(|s| s.qr_code.as_deref()).collect();
        assert_eq!(qr, vec![Some("QR-PORTON"), Some("QR-BODEGA")]);
        assert_eq!(round.scans[0].latitude, submission.scans[0].latitude);
        assert!(round.synchronized);
    }
}
