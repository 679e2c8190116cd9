use binrw::{BinRead, BinWrite};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 4 contiguous floats for encoding XYZW data.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(BinRead, BinWrite, Debug, PartialEq, Clone, Copy, Default)]
#[brw(little)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector4 {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Vector4 {
        Vector4 { x, y, z, w }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl From<[f32; 4]> for Vector4 {
    fn from(v: [f32; 4]) -> Self {
        Self {
            x: v[0],
            y: v[1],
            z: v[2],
            w: v[3],
        }
    }
}

/// A row-major 4x4 matrix of contiguous floats.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(BinRead, BinWrite, Debug, PartialEq, Clone, Copy)]
#[brw(little)]
pub struct Matrix4x4 {
    pub row1: Vector4,
    pub row2: Vector4,
    pub row3: Vector4,
    pub row4: Vector4,
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix4x4 {
    /// The identity transformation matrix.
    ///
    /**
    ```rust
    use rac_lib::{Vector4, Matrix4x4};

    let m = Matrix4x4::identity();
    assert_eq!(Vector4::new(1f32, 0f32, 0f32, 0f32), m.row1);
    assert_eq!(Vector4::new(0f32, 1f32, 0f32, 0f32), m.row2);
    assert_eq!(Vector4::new(0f32, 0f32, 1f32, 0f32), m.row3);
    assert_eq!(Vector4::new(0f32, 0f32, 0f32, 1f32), m.row4);
    ```
    */
    pub fn identity() -> Matrix4x4 {
        Matrix4x4 {
            row1: Vector4::new(1f32, 0f32, 0f32, 0f32),
            row2: Vector4::new(0f32, 1f32, 0f32, 0f32),
            row3: Vector4::new(0f32, 0f32, 1f32, 0f32),
            row4: Vector4::new(0f32, 0f32, 0f32, 1f32),
        }
    }

    /// Converts the elements to a 2d array in row-major order.
    pub fn to_rows_array(&self) -> [[f32; 4]; 4] {
        [
            self.row1.to_array(),
            self.row2.to_array(),
            self.row3.to_array(),
            self.row4.to_array(),
        ]
    }

    /// Creates the matrix from a 2d array in row-major order.
    /**
    ```rust
    # use rac_lib::Matrix4x4;
    let elements = [
        [1f32, 2f32, 3f32, 4f32],
        [5f32, 6f32, 7f32, 8f32],
        [9f32, 10f32, 11f32, 12f32],
        [13f32, 14f32, 15f32, 16f32],
    ];
    let m = Matrix4x4::from_rows_array(&elements);
    assert_eq!(elements, m.to_rows_array());
    ```
    */
    pub fn from_rows_array(rows: &[[f32; 4]; 4]) -> Matrix4x4 {
        Matrix4x4 {
            row1: rows[0].into(),
            row2: rows[1].into(),
            row3: rows[2].into(),
            row4: rows[3].into(),
        }
    }

    /// Swaps the rows and columns.
    /**
    ```rust
    # use rac_lib::{Matrix4x4, Vector4};
    let m = Matrix4x4::from_rows_array(&[
        [1f32, 2f32, 3f32, 4f32],
        [5f32, 6f32, 7f32, 8f32],
        [9f32, 10f32, 11f32, 12f32],
        [13f32, 14f32, 15f32, 16f32],
    ]);
    assert_eq!(Vector4::new(1f32, 5f32, 9f32, 13f32), m.transpose().row1);
    ```
    */
    pub fn transpose(&self) -> Matrix4x4 {
        let rows = self.to_rows_array();
        let mut columns = [[0f32; 4]; 4];
        for (i, row) in rows.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                columns[j][i] = *value;
            }
        }
        Matrix4x4::from_rows_array(&columns)
    }
}
