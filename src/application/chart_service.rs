// Chart service - Use cases for managing a project's charts
use crate::application::chart_repository::{ChartRepository, ChartRow};
use crate::domain::chart::{Chart, ChartType};
use crate::domain::defaults::{chart_defaults, ProjectContext};
use crate::domain::error::ChartError;
use crate::infrastructure::parameters_codec::{parameters_from_json, parameters_to_json};
use std::sync::Arc;

#[derive(Clone)]
pub struct ChartService {
    repository: Arc<dyn ChartRepository>,
}

impl ChartService {
    pub fn new(repository: Arc<dyn ChartRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_charts(&self, project: &str) -> Result<Vec<Chart>, ChartError> {
        let rows = self.repository.list(project).await?;
        let mut charts = Vec::with_capacity(rows.len());

        for row in rows {
            let id = row.id;
            match row_to_chart(row) {
                Ok(chart) => charts.push(chart),
                Err(e) => {
                    // Unreadable row, skip it
                    tracing::warn!("Skipping chart {} in project {}: {}", id, project, e);
                }
            }
        }

        Ok(charts)
    }

    pub async fn get_chart(&self, project: &str, id: i64) -> Result<Chart, ChartError> {
        let row = self
            .repository
            .fetch(project, id)
            .await?
            .ok_or_else(|| not_found(project, id))?;
        row_to_chart(row)
    }

    /// Store a validated chart under a freshly assigned id.
    pub async fn add_chart(&self, project: &str, chart: Chart) -> Result<Chart, ChartError> {
        let row = chart_to_row(project, &chart)?;
        let id = self.repository.insert(row).await?;
        tracing::info!("Added {} chart {} to project {}", chart.chart_type(), id, project);
        Ok(chart.with_id(id))
    }

    /// Create a chart of `chart_type` with default parameters for the project.
    pub async fn create_default_chart(
        &self,
        project: &str,
        name: &str,
        chart_type: ChartType,
        context: &ProjectContext,
    ) -> Result<Chart, ChartError> {
        let chart = chart_defaults(name, 0, chart_type, context)?;
        self.add_chart(project, chart).await
    }

    pub async fn update_chart(&self, project: &str, chart: Chart) -> Result<Chart, ChartError> {
        let row = chart_to_row(project, &chart)?;
        if !self.repository.update(row).await? {
            return Err(not_found(project, chart.id()));
        }
        tracing::info!("Updated chart {} in project {}", chart.id(), project);
        Ok(chart)
    }

    pub async fn delete_chart(&self, project: &str, id: i64) -> Result<(), ChartError> {
        if !self.repository.delete(project, id).await? {
            return Err(not_found(project, id));
        }
        tracing::info!("Deleted chart {} from project {}", id, project);
        Ok(())
    }
}

fn not_found(project: &str, id: i64) -> ChartError {
    ChartError::NotFound {
        project: project.to_string(),
        id,
    }
}

fn chart_to_row(project: &str, chart: &Chart) -> Result<ChartRow, ChartError> {
    Ok(ChartRow {
        id: chart.id(),
        project: project.to_string(),
        name: chart.name().to_string(),
        chart_type: chart.chart_type().to_string(),
        parameters: parameters_to_json(chart.parameters())?,
    })
}

fn row_to_chart(row: ChartRow) -> Result<Chart, ChartError> {
    let chart_type: ChartType = row.chart_type.parse()?;
    let parameters = parameters_from_json(chart_type, &row.parameters)?;
    Chart::new(row.id, row.name, chart_type, parameters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::ChartParameters;
    use crate::infrastructure::memory_repository::InMemoryChartRepository;

    fn context() -> ProjectContext {
        ProjectContext {
            slices: vec![1, 2, 3],
            models: vec!["gpt-4".to_string()],
            metrics: vec![1],
        }
    }

    fn service() -> (ChartService, Arc<InMemoryChartRepository>) {
        let repository = Arc::new(InMemoryChartRepository::new());
        (ChartService::new(repository.clone()), repository)
    }

    #[tokio::test]
    async fn test_add_assigns_ids_per_insert() {
        let (service, _) = service();
        let first = chart_defaults("Bars", 99, ChartType::Bar, &context()).unwrap();
        let second = chart_defaults("Lines", 99, ChartType::Line, &context()).unwrap();

        let first = service.add_chart("demo", first).await.unwrap();
        let second = service.add_chart("demo", second).await.unwrap();
        assert_eq!(first.id(), 1);
        assert_eq!(second.id(), 2);

        let fetched = service.get_chart("demo", 2).await.unwrap();
        assert_eq!(fetched, second);
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_project() {
        let (service, _) = service();
        service
            .create_default_chart("demo", "Table", ChartType::Table, &context())
            .await
            .unwrap();
        service
            .create_default_chart("other", "Radar", ChartType::Radar, &context())
            .await
            .unwrap();

        let charts = service.list_charts("demo").await.unwrap();
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].chart_type(), ChartType::Table);
        assert!(service.list_charts("empty").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (service, _) = service();
        let chart = service
            .create_default_chart("demo", "Heat", ChartType::Heatmap, &context())
            .await
            .unwrap();

        let ChartParameters::Heatmap(mut heatmap) = chart.parameters().clone() else {
            panic!("expected heatmap parameters");
        };
        heatmap.metric = 4;
        let changed = Chart::new(
            chart.id(),
            "Heat v2",
            ChartType::Heatmap,
            ChartParameters::Heatmap(heatmap),
        )
        .unwrap();
        service.update_chart("demo", changed.clone()).await.unwrap();
        assert_eq!(service.get_chart("demo", chart.id()).await.unwrap(), changed);

        service.delete_chart("demo", chart.id()).await.unwrap();
        let err = service.get_chart("demo", chart.id()).await.unwrap_err();
        assert!(matches!(err, ChartError::NotFound { id, .. } if id == chart.id()));
        assert!(matches!(
            service.delete_chart("demo", chart.id()).await.unwrap_err(),
            ChartError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_update_missing_chart() {
        let (service, _) = service();
        let chart = chart_defaults("Bars", 5, ChartType::Bar, &context()).unwrap();
        let err = service.update_chart("demo", chart).await.unwrap_err();
        assert!(matches!(err, ChartError::NotFound { id: 5, .. }));
    }

    #[tokio::test]
    async fn test_corrupt_rows() {
        let (service, repository) = service();
        service
            .create_default_chart("demo", "Bars", ChartType::Bar, &context())
            .await
            .unwrap();
        let bad_id = repository
            .insert(ChartRow {
                id: 0,
                project: "demo".to_string(),
                name: "Broken".to_string(),
                chart_type: "HEATMAP".to_string(),
                parameters: r#"{"slices":[1],"metric":1}"#.to_string(),
            })
            .await
            .unwrap();

        let charts = service.list_charts("demo").await.unwrap();
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].name(), "Bars");

        let err = service.get_chart("demo", bad_id).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_stored_row_uses_snake_case() {
        let (service, repository) = service();
        let chart = service
            .create_default_chart("demo", "Swarm", ChartType::Beeswarm, &context())
            .await
            .unwrap();
        let row = repository.fetch("demo", chart.id()).await.unwrap().unwrap();
        assert_eq!(row.chart_type, "BEESWARM");
        assert!(row.parameters.contains("\"fixed_dimension\":\"y\""));
        assert!(!row.parameters.contains("fixedDimension"));
    }
}
