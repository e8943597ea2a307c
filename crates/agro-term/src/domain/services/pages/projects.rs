use agro_types::{Catalogs, CultivationPlan};
use async_trait::async_trait;

use super::{redirect_to_login, Failure, Page, PageContext};
use crate::domain::models::{Outcome, PageState};

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectListView {
    pub plans: Vec<CultivationPlan>,
    pub catalogs: Catalogs,
    pub crop_filter: Option<i64>,
}

impl ProjectListView {
    pub fn visible(&self) -> Vec<&CultivationPlan> {
        return self
            .plans
            .iter()
            .filter(|plan| match self.crop_filter {
                Some(crop) => plan.crops.contains(&crop),
                None => true,
            })
            .collect();
    }

    pub fn crop_names(&self, plan: &CultivationPlan) -> Vec<String> {
        return plan
            .crops
            .iter()
            .map(|id| {
                self.catalogs
                    .crop_name(*id)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("#{id}"))
            })
            .collect();
    }
}

/// Cultivation plans visible to the signed-in user, either role.
pub struct ProjectListPage {
    ctx: PageContext,
    state: PageState<ProjectListView>,
}

impl ProjectListPage {
    pub fn new(ctx: PageContext) -> ProjectListPage {
        return ProjectListPage {
            ctx,
            state: PageState::Init,
        };
    }

    pub fn filter_by_crop(&mut self, crop: Option<i64>) {
        if let Some(view) = self.state.view_mut() {
            view.crop_filter = crop;
        }
    }
}

#[async_trait]
impl Page for ProjectListPage {
    type View = ProjectListView;

    async fn load(&mut self) -> Outcome {
        self.state = PageState::AuthChecking;
        if self.ctx.guard(None).is_none() {
            return redirect_to_login(&mut self.state);
        }
        self.state = PageState::Loading;

        let (plans, crops) = tokio::join!(self.ctx.api.plans(), self.ctx.api.crops());

        let plans = match plans {
            Ok(plans) => plans,
            Err(err) => return self.ctx.load_failed(&mut self.state, &err, None),
        };
        let crops = match crops {
            Ok(crops) => crops,
            Err(err) => match self.ctx.explain(&err) {
                Failure::Login => return redirect_to_login(&mut self.state),
                Failure::Message(_) => Vec::new(),
            },
        };

        self.state = PageState::Rendered(ProjectListView {
            plans,
            catalogs: Catalogs {
                crops,
                soil_types: Vec::new(),
            },
            crop_filter: None,
        });
        return Outcome::Stay;
    }

    fn state(&self) -> &PageState<ProjectListView> {
        return &self.state;
    }
}
