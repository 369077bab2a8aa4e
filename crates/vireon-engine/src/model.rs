//! Model state and the explicit Euler update for each variant.
//!
//! [`Model`] is a closed tagged union over the two variants. Each variant
//! owns its live fields, a [`PeriodicLaplacian`] bound to its grid, and
//! Laplacian scratch buffers reused every step. All derivatives are
//! evaluated on the pre-step state (Jacobi-style), so updating cells in
//! place is safe once the Laplacians have been written to scratch.

use vireon_core::{Field, FieldMap, GrayScottConfig, ModelConfig, ModelKind, SqkConfig};
use vireon_numerics::{init_gray_scott, init_sqk, ForcingProfile, PeriodicLaplacian};

// ── SqkModel ───────────────────────────────────────────────────────

/// Live state of the three-field SQK model.
#[derive(Clone, Debug)]
pub struct SqkModel {
    cfg: SqkConfig,
    g: Field,
    x: Field,
    y: Field,
    stencil: PeriodicLaplacian,
    forcing: Option<ForcingProfile>,
    lap_g: Field,
    lap_x: Field,
    lap_y: Field,
    steps: u64,
    diverged: bool,
}

impl SqkModel {
    /// Initialize from `cfg` with the given seed.
    pub fn new(cfg: &SqkConfig, seed: u64) -> Self {
        let grid = cfg.grid().grid();
        let init = init_sqk(cfg, seed);
        let n = grid.n();
        let forcing = cfg
            .enable_forcing()
            .then(|| ForcingProfile::new(&grid, cfg.forcing()));
        Self {
            cfg: *cfg,
            g: init.g,
            x: init.x,
            y: init.y,
            stencil: PeriodicLaplacian::new(&grid),
            forcing,
            lap_g: Field::zeros(n),
            lap_x: Field::zeros(n),
            lap_y: Field::zeros(n),
            steps: 0,
            diverged: false,
        }
    }

    /// Advance one explicit Euler step of size `dt`.
    ///
    /// The forcing term is evaluated at the pre-step time `steps · dt`.
    pub fn step(&mut self, dt: f64) {
        self.stencil.apply(&self.g, &mut self.lap_g);
        self.stencil.apply(&self.x, &mut self.lap_x);
        self.stencil.apply(&self.y, &mut self.lap_y);

        let t = self.steps as f64 * dt;
        let chi = self.forcing.as_ref().map(|p| (p.spatial(), p.temporal(t)));
        let c = &self.cfg;

        let g = self.g.as_mut_slice();
        let x = self.x.as_mut_slice();
        let y = self.y.as_mut_slice();
        let lg = self.lap_g.as_slice();
        let lx = self.lap_x.as_slice();
        let ly = self.lap_y.as_slice();

        let mut finite = true;
        for i in 0..g.len() {
            let (gi, xi, yi) = (g[i], x[i], y[i]);
            let xs = xi + c.c1();
            let q = xs * xs * (yi + c.c2());
            let forcing = match chi {
                Some((spatial, amp)) => spatial.as_slice()[i] * amp,
                None => 0.0,
            };

            let dg = c.dg() * lg[i] + c.alpha_g() * q - c.beta_g() * gi;
            let dx = c.dx() * lx[i] + c.alpha_x() * q - c.beta_x() * xi + forcing;
            let dy = c.dy() * ly[i] + c.alpha_y() * q - c.beta_y() * yi;

            g[i] = gi + dt * dg;
            x[i] = xi + dt * dx;
            y[i] = yi + dt * dy;
            finite &= g[i].is_finite() && x[i].is_finite() && y[i].is_finite();
        }

        self.steps += 1;
        self.diverged |= !finite;
    }

    /// True once any field has held a non-finite value.
    pub fn diverged(&self) -> bool {
        self.diverged
    }

    /// Deep copy of `{G, X, Y}`.
    pub fn snapshot(&self) -> FieldMap {
        let mut m = FieldMap::with_capacity(3);
        m.insert("G", self.g.clone());
        m.insert("X", self.x.clone());
        m.insert("Y", self.y.clone());
        m
    }

    /// Move the live fields out as `{G, X, Y}`.
    pub fn into_fields(self) -> FieldMap {
        let mut m = FieldMap::with_capacity(3);
        m.insert("G", self.g);
        m.insert("X", self.x);
        m.insert("Y", self.y);
        m
    }
}

// ── GrayScottModel ─────────────────────────────────────────────────

/// Live state of the two-field Gray-Scott model.
#[derive(Clone, Debug)]
pub struct GrayScottModel {
    cfg: GrayScottConfig,
    u: Field,
    v: Field,
    stencil: PeriodicLaplacian,
    lap_u: Field,
    lap_v: Field,
    steps: u64,
    diverged: bool,
}

impl GrayScottModel {
    /// Initialize from `cfg` with the given seed.
    pub fn new(cfg: &GrayScottConfig, seed: u64) -> Self {
        let grid = cfg.grid().grid();
        let init = init_gray_scott(cfg, seed);
        let n = grid.n();
        Self {
            cfg: *cfg,
            u: init.u,
            v: init.v,
            stencil: PeriodicLaplacian::new(&grid),
            lap_u: Field::zeros(n),
            lap_v: Field::zeros(n),
            steps: 0,
            diverged: false,
        }
    }

    /// Advance one explicit Euler step of size `dt`.
    pub fn step(&mut self, dt: f64) {
        self.stencil.apply(&self.u, &mut self.lap_u);
        self.stencil.apply(&self.v, &mut self.lap_v);

        let c = &self.cfg;
        let feed = c.f();
        let loss = c.f() + c.k();

        let u = self.u.as_mut_slice();
        let v = self.v.as_mut_slice();
        let lu = self.lap_u.as_slice();
        let lv = self.lap_v.as_slice();

        let mut finite = true;
        for i in 0..u.len() {
            let (ui, vi) = (u[i], v[i]);
            let uv2 = ui * vi * vi;
            let du = c.du() * lu[i] - uv2 + feed * (1.0 - ui);
            let dv = c.dv() * lv[i] + uv2 - loss * vi;
            u[i] = ui + dt * du;
            v[i] = vi + dt * dv;
            finite &= u[i].is_finite() && v[i].is_finite();
        }

        self.steps += 1;
        self.diverged |= !finite;
    }

    /// True once any field has held a non-finite value.
    pub fn diverged(&self) -> bool {
        self.diverged
    }

    /// Deep copy of `{u, v}`.
    pub fn snapshot(&self) -> FieldMap {
        let mut m = FieldMap::with_capacity(2);
        m.insert("u", self.u.clone());
        m.insert("v", self.v.clone());
        m
    }

    /// Move the live fields out as `{u, v}`.
    pub fn into_fields(self) -> FieldMap {
        let mut m = FieldMap::with_capacity(2);
        m.insert("u", self.u);
        m.insert("v", self.v);
        m
    }
}

// ── Model ──────────────────────────────────────────────────────────

/// The closed set of integrable models.
#[derive(Clone, Debug)]
pub enum Model {
    /// Three-field forced model.
    Sqk(SqkModel),
    /// Gray-Scott baseline.
    GrayScott(GrayScottModel),
}

impl Model {
    /// Initialize the variant selected by `cfg`.
    pub fn new(cfg: &ModelConfig, seed: u64) -> Self {
        match cfg {
            ModelConfig::Sqk(c) => Self::Sqk(SqkModel::new(c, seed)),
            ModelConfig::GrayScott(c) => Self::GrayScott(GrayScottModel::new(c, seed)),
        }
    }

    /// Variant tag.
    pub fn kind(&self) -> ModelKind {
        match self {
            Self::Sqk(_) => ModelKind::Sqk,
            Self::GrayScott(_) => ModelKind::GrayScott,
        }
    }

    /// Advance one explicit Euler step.
    pub fn step(&mut self, dt: f64) {
        match self {
            Self::Sqk(m) => m.step(dt),
            Self::GrayScott(m) => m.step(dt),
        }
    }

    /// True once any field has held a non-finite value.
    pub fn diverged(&self) -> bool {
        match self {
            Self::Sqk(m) => m.diverged(),
            Self::GrayScott(m) => m.diverged(),
        }
    }

    /// Number of steps taken so far.
    pub fn steps(&self) -> u64 {
        match self {
            Self::Sqk(m) => m.steps,
            Self::GrayScott(m) => m.steps,
        }
    }

    /// Deep copy of all fields.
    pub fn snapshot(&self) -> FieldMap {
        match self {
            Self::Sqk(m) => m.snapshot(),
            Self::GrayScott(m) => m.snapshot(),
        }
    }

    /// Consume the model, returning its fields.
    pub fn into_fields(self) -> FieldMap {
        match self {
            Self::Sqk(m) => m.into_fields(),
            Self::GrayScott(m) => m.into_fields(),
        }
    }
}
