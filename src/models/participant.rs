use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 参与者。名单由外部导入，一经导入不再修改；
/// `id` 即身份标识（如工号），全池要求唯一。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Participant {
    /// 唯一标识（工号等）
    pub id: String,
    /// 姓名
    pub name: String,
    /// 部门（可选）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// 批量导入请求。表格解析在前端完成，这里只接收解析后的行数据。
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ImportParticipantsRequest {
    pub participants: Vec<ParticipantImport>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ParticipantImport {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub department: Option<String>,
}

/// 导入结果
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ImportParticipantsResponse {
    /// 本次成功导入人数
    pub imported: usize,
    /// 因重复或字段缺失被跳过的行数
    pub skipped: usize,
    /// 导入后名单总人数
    pub total: usize,
}

/// 参与者名单查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ParticipantQuery {
    /// 页码 (默认 1)
    pub page: Option<u32>,
    /// 每页数量 (默认 20)
    pub per_page: Option<u32>,
}
