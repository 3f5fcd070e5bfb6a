//! Snub dodecahedron geometry fixture.
//!
//! Vertex coordinates and face connectivity from George Hart's Virtual
//! Polyhedra (via the `polyhedra` data set). The board has 92 faces: ids
//! [0,80) are triangles and [80,92) are pentagons, the HQ spaces. Faces
//! never move or change kind; identity is the id.
//!
//! The rules engine only consumes the vertex-index lists (to derive the
//! adjacency graph); the coordinates are carried for presentation layers
//! that need to place meshes and are not used by any rule.

/// A face of the board, indexed `0..FACE_COUNT`.
pub type FaceId = usize;

/// Total number of faces on the snub dodecahedron.
pub const FACE_COUNT: usize = 92;

/// Number of triangular faces (ids `0..80`).
pub const TRIANGLE_COUNT: usize = 80;

/// Number of pentagonal HQ faces (ids `80..92`).
pub const PENTAGON_COUNT: usize = 12;

/// Number of vertices.
pub const VERTEX_COUNT: usize = 60;

/// The kind of a board face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceKind {
    Triangle,
    Pentagon,
}

impl FaceKind {
    /// Returns the kind of a face, a pure function of the id.
    ///
    /// Ids below `TRIANGLE_COUNT` are triangles; the rest are pentagons.
    /// The caller is expected to pass a valid face id.
    pub const fn of(face: FaceId) -> FaceKind {
        if face < TRIANGLE_COUNT {
            FaceKind::Triangle
        } else {
            FaceKind::Pentagon
        }
    }
}

/// Returns true if `face` is a valid board face id.
pub const fn is_valid_face(face: FaceId) -> bool {
    face < FACE_COUNT
}

/// Returns the 12 pentagon (HQ) face ids in index order.
pub fn hq_faces() -> [FaceId; PENTAGON_COUNT] {
    let mut faces = [0; PENTAGON_COUNT];
    let mut i = 0;
    while i < PENTAGON_COUNT {
        faces[i] = TRIANGLE_COUNT + i;
        i += 1;
    }
    faces
}

/// Returns the vertex-index list of a face, or None for an invalid id.
pub fn face_vertices(face: FaceId) -> Option<&'static [usize]> {
    if face < TRIANGLE_COUNT {
        Some(&TRIANGLES[face])
    } else if face < FACE_COUNT {
        Some(&PENTAGONS[face - TRIANGLE_COUNT])
    } else {
        None
    }
}

/// Vertex coordinates, scaled to a circumradius of ~1.028.
pub static VERTICES: [[f64; 3]; VERTEX_COUNT] = [
    [0.0, 0.0, 1.028031],
    [0.4638569, 0.0, 0.9174342],
    [0.2187436, 0.4090409, 0.9174342],
    [-0.2575486, 0.3857874, 0.9174342],
    [-0.4616509, -0.04518499, 0.9174342],
    [-0.177858, -0.4284037, 0.9174342],
    [0.5726782, -0.4284037, 0.7384841],
    [0.8259401, -0.04518499, 0.6104342],
    [0.6437955, 0.3857874, 0.702527],
    [0.349648, 0.7496433, 0.6104342],
    [-0.421009, 0.7120184, 0.6104342],
    [-0.6783139, 0.3212396, 0.702527],
    [-0.6031536, -0.4466658, 0.702527],
    [-0.2749612, -0.7801379, 0.6104342],
    [0.1760766, -0.6931717, 0.7384841],
    [0.5208138, -0.7801379, 0.4206978],
    [0.8552518, -0.4466658, 0.3547998],
    [1.01294, -0.03548596, 0.1718776],
    [0.7182239, 0.661842, 0.3208868],
    [0.3633691, 0.9454568, 0.1758496],
    [-0.04574087, 0.9368937, 0.4206978],
    [-0.4537394, 0.905564, 0.1758496],
    [-0.7792791, 0.5887312, 0.3208868],
    [-0.9537217, 0.1462217, 0.3547998],
    [-0.9072701, -0.3283699, 0.3547998],
    [-0.6503371, -0.7286577, 0.3208868],
    [0.08459482, -0.9611501, 0.3547998],
    [0.3949153, -0.9491262, -0.007072558],
    [0.9360473, -0.409557, -0.1136978],
    [0.9829382, 0.02692292, -0.2999274],
    [0.9463677, 0.4014808, -0.007072558],
    [0.6704578, 0.7662826, -0.1419366],
    [-0.05007646, 1.025698, -0.04779978],
    [-0.4294337, 0.8845784, -0.2999274],
    [-0.9561681, 0.3719321, -0.06525234],
    [-1.022036, -0.1000338, -0.04779978],
    [-0.8659056, -0.5502712, -0.06525234],
    [-0.5227761, -0.8778535, -0.1136978],
    [-0.06856319, -1.021542, -0.09273844],
    [0.2232046, -0.8974878, -0.4489366],
    [0.6515438, -0.7200947, -0.3373472],
    [0.7969535, -0.3253959, -0.5619888],
    [0.8066872, 0.4395354, -0.461425],
    [0.4468035, 0.735788, -0.5619888],
    [0.001488801, 0.8961155, -0.503809],
    [-0.3535403, 0.6537658, -0.7102452],
    [-0.7399517, 0.5547758, -0.4489366],
    [-0.9120238, 0.1102196, -0.461425],
    [-0.6593998, -0.6182798, -0.4896639],
    [-0.2490651, -0.8608088, -0.503809],
    [0.4301047, -0.5764987, -0.734512],
    [0.5057577, -0.1305283, -0.8854492],
    [0.5117735, 0.3422252, -0.8232973],
    [0.09739587, 0.5771941, -0.8451093],
    [-0.6018946, 0.2552591, -0.7933564],
    [-0.6879024, -0.2100741, -0.734512],
    [-0.3340437, -0.5171509, -0.8232973],
    [0.08570633, -0.3414376, -0.9658797],
    [0.1277354, 0.1313635, -1.011571],
    [-0.3044499, -0.06760332, -0.979586],
];

/// The 80 triangular faces as vertex-index triples.
pub static TRIANGLES: [[usize; 3]; TRIANGLE_COUNT] = [
    [0, 1, 2],
    [0, 2, 3],
    [0, 3, 4],
    [0, 4, 5],
    [1, 6, 7],
    [1, 7, 8],
    [1, 8, 2],
    [2, 8, 9],
    [3, 10, 11],
    [3, 11, 4],
    [4, 12, 5],
    [5, 12, 13],
    [5, 13, 14],
    [6, 14, 15],
    [6, 15, 16],
    [6, 16, 7],
    [7, 16, 17],
    [8, 18, 9],
    [9, 18, 19],
    [9, 19, 20],
    [10, 20, 21],
    [10, 21, 22],
    [10, 22, 11],
    [11, 22, 23],
    [12, 24, 25],
    [12, 25, 13],
    [13, 26, 14],
    [14, 26, 15],
    [15, 26, 27],
    [16, 28, 17],
    [17, 28, 29],
    [17, 29, 30],
    [18, 30, 31],
    [18, 31, 19],
    [19, 32, 20],
    [20, 32, 21],
    [21, 32, 33],
    [22, 34, 23],
    [23, 34, 35],
    [23, 35, 24],
    [24, 35, 36],
    [24, 36, 25],
    [25, 36, 37],
    [26, 38, 27],
    [27, 38, 39],
    [27, 39, 40],
    [28, 40, 41],
    [28, 41, 29],
    [29, 42, 30],
    [30, 42, 31],
    [31, 42, 43],
    [32, 44, 33],
    [33, 44, 45],
    [33, 45, 46],
    [34, 46, 47],
    [34, 47, 35],
    [36, 48, 37],
    [37, 48, 49],
    [37, 49, 38],
    [38, 49, 39],
    [39, 50, 40],
    [40, 50, 41],
    [41, 50, 51],
    [42, 52, 43],
    [43, 52, 53],
    [43, 53, 44],
    [44, 53, 45],
    [45, 54, 46],
    [46, 54, 47],
    [47, 54, 55],
    [48, 55, 56],
    [48, 56, 49],
    [50, 57, 51],
    [51, 57, 58],
    [51, 58, 52],
    [52, 58, 53],
    [54, 59, 55],
    [55, 59, 56],
    [56, 59, 57],
    [57, 59, 58],
];

/// The 12 pentagonal HQ faces as vertex-index quintuples.
pub static PENTAGONS: [[usize; 5]; PENTAGON_COUNT] = [
    [0, 5, 14, 6, 1],
    [2, 9, 20, 10, 3],
    [4, 11, 23, 24, 12],
    [7, 17, 30, 18, 8],
    [13, 25, 37, 38, 26],
    [15, 27, 40, 28, 16],
    [19, 31, 43, 44, 32],
    [21, 33, 46, 34, 22],
    [29, 41, 51, 52, 42],
    [35, 47, 55, 48, 36],
    [39, 49, 56, 57, 50],
    [45, 53, 58, 59, 54],
];
