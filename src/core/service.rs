/// 长期存活的服务对象（搜索引擎等），名称用于日志
pub trait Service: Send + Sync {
    fn name(&self) -> &'static str;
}
